use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while merging or splitting
#[derive(Error, Debug)]
pub enum Error {
    /// Directory missing or unreadable, or a file could not be written
    #[error("Filesystem error on {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No media files matched in the input directory
    #[error("No video files found in {dir:?}")]
    EmptyInput { dir: PathBuf },

    /// Engine output did not have the expected shape
    #[error("Could not parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    /// Child process exited with non-zero code
    #[error("{program} exited with code {code}:\n{stderr}")]
    ExternalTool {
        program: String,
        code: u8,
        stderr: String,
    },

    /// Child process could not be started at all
    #[error("Error executing {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed filename, naming pattern or segment length
    #[error("Invalid format {input:?}: {reason}")]
    Format { input: String, reason: String },
}

impl Error {
    /// Exit code the binary should return for this error
    ///
    /// External tool failures propagate the child's own exit code
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ExternalTool { code, .. } => *code,
            _ => 1,
        }
    }

    pub(crate) fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
