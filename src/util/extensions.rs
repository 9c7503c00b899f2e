use std::process::{Command, Output};
use tracing::debug;
use crate::error::{Error, Result};

#[allow(unused_imports)]
pub mod command_extensions {
    pub use std::process::Command;
    pub use super::{CommandExt, CommandOutputExt};
}

pub type CommandExit = std::result::Result<(), u8>;

/// Simple extension trait to avoid duplicating code, allow easy conversion to `ExitCode`
pub trait CommandOutputExt {
    /// Convert into `std::process::ExitCode` easily consistantly
    ///
    /// Equal to `ExitCode::from(1)` in case of signal termination (or any exit code larger than 255)
    fn to_exitcode(&self) -> CommandExit;
}

impl CommandOutputExt for std::process::ExitStatus {
    fn to_exitcode(&self) -> CommandExit {
        // signal termination has no code, and codes above 255 do not fit into u8
        match TryInto::<u8>::try_into(self.code().unwrap_or(1)).unwrap_or(1) {
            0 => Ok(()),
            x => Err(x),
        }
    }
}

impl CommandOutputExt for Output {
    fn to_exitcode(&self) -> CommandExit {
        self.status.to_exitcode()
    }
}

pub trait CommandExt {
    /// Program name as a printable string
    fn program_name(&self) -> String;

    /// Prints the command in readable and copy-able format
    fn print_escaped_cmd(&self);

    /// Run to completion capturing stdout and stderr, only failing if the process could not
    /// be started
    fn capture(&mut self) -> Result<Output>;

    /// Same as `capture` but non-zero exit is turned into `Error::ExternalTool`
    fn capture_checked(&mut self) -> Result<Output>;
}

impl CommandExt for Command {
    fn program_name(&self) -> String {
        self.get_program().to_string_lossy().to_string()
    }

    fn print_escaped_cmd(&self) {
        println!("(CMD) {:#?}", self.get_program());
        for arg in self.get_args() {
            println!("      {:#?}", arg);
        }
    }

    fn capture(&mut self) -> Result<Output> {
        debug!(program = ?self.get_program(), args = ?self.get_args().collect::<Vec<_>>(), "running");

        // output() always waits for the child so nothing is left unreaped
        self.output().map_err(|source| Error::Spawn {
            program: self.program_name(),
            source,
        })
    }

    fn capture_checked(&mut self) -> Result<Output> {
        let output = self.capture()?;

        match output.to_exitcode() {
            Ok(()) => Ok(output),
            Err(code) => Err(Error::ExternalTool {
                program: self.program_name(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            }),
        }
    }
}
