use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::Result;
use crate::util::{format_clock, extensions::command_extensions::*};
use super::{parse_diagnostic_duration, parse_probe_duration, MediaEngine};

const COMMON_FFMPEG_ARGS: &[&str] = &[
    // print only errors
    "-loglevel", "error",

    // do not ask to overwrite
    "-y",
];

/// `MediaEngine` backed by the ffmpeg and ffprobe binaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ffmpeg {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,

    /// Print commands that modify the filesystem instead of running them, probes still run
    pub dry_run: bool,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            dry_run: false,
        }
    }
}

impl Ffmpeg {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            dry_run,
        }
    }

    fn concat_cmd(&self, manifest: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(COMMON_FFMPEG_ARGS);
        cmd.args([
            "-f", "concat",

            // manifest paths may be absolute
            "-safe", "0",

            // use following file for the concat list
            "-i",
        ]);
        cmd.arg(manifest);
        cmd.args([
            "-c", "copy",

            // shift so the first frame starts at zero
            "-avoid_negative_ts", "make_zero",
        ]);
        cmd.arg(output);
        cmd
    }

    fn extract_cmd(&self, source: &Path, start: u64, duration: u64, output: &Path) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(COMMON_FFMPEG_ARGS);
        cmd.arg("-i").arg(source);
        cmd.args([
            // no re-encoding, keep every stream
            "-c", "copy",
            "-map", "0",
        ]);
        cmd.args([
            "-ss".into(), format_clock(start),
            "-t".into(), format_clock(duration),
        ]);
        cmd.arg(output);
        cmd
    }

    /// Run a command that writes files, or just print it on dry run
    fn run_modifying(&self, mut cmd: Command) -> Result<()> {
        if self.dry_run {
            cmd.print_escaped_cmd();
            return Ok(());
        }

        cmd.capture_checked()?;
        Ok(())
    }
}

impl MediaEngine for Ffmpeg {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v", "error",
                "-show_entries", "format=duration",
                "-of", "json",
            ])
            .arg(path)
            .capture_checked()?;

        let duration = parse_probe_duration(&String::from_utf8_lossy(&output.stdout))?;
        debug!(?path, duration, "probed duration");

        Ok(duration)
    }

    fn scan_duration(&self, path: &Path) -> Result<f64> {
        // the duration is printed in the banner so no log level limiting here
        let output = Command::new(&self.ffmpeg)
            .arg("-hide_banner")
            .arg("-i")
            .arg(path)
            .args(["-f", "null", "-"])
            .capture()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        match parse_diagnostic_duration(&stderr) {
            Ok(x) => Ok(x),
            // without a duration the exit code is the more useful error
            Err(err) => match output.to_exitcode() {
                Ok(()) => Err(err),
                Err(code) => Err(crate::Error::ExternalTool {
                    program: self.ffmpeg.to_string_lossy().to_string(),
                    code,
                    stderr: stderr.trim_end().to_string(),
                }),
            },
        }
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        info!(?manifest, ?output, "concatenating");
        self.run_modifying(self.concat_cmd(manifest, output))
    }

    fn extract_range(&self, source: &Path, start: u64, duration: u64, output: &Path) -> Result<()> {
        info!(?source, start, duration, ?output, "extracting range");
        self.run_modifying(self.extract_cmd(source, start, duration, output))
    }
}
