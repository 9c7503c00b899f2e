//! Seam between the batch logic and the external media engine
//!
//! Every bit of actual media work goes through [`MediaEngine`] so that the planning code never
//! touches a subprocess directly. [`ffmpeg::Ffmpeg`] is the real implementation.

pub mod ffmpeg;

use std::path::Path;
use regex::Regex;
use crate::error::{Error, Result};

pub use ffmpeg::Ffmpeg;

pub trait MediaEngine {
    /// Container duration in seconds as reported by the format probe
    fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Duration in seconds read from the diagnostic output of opening the file
    fn scan_duration(&self, path: &Path) -> Result<f64>;

    /// Concatenate everything listed in the manifest into `output` without re-encoding
    fn concat(&self, manifest: &Path, output: &Path) -> Result<()>;

    /// Copy `duration` seconds starting at `start` seconds into `output`
    ///
    /// Requesting more than what is left of the source is fine, the engine stops at the end of
    /// the stream
    fn extract_range(&self, source: &Path, start: u64, duration: u64, output: &Path) -> Result<()>;
}

/// Find the first `Duration: H:MM:SS.ff` marker in ffmpeg diagnostics and convert it to seconds
pub fn parse_diagnostic_duration(text: &str) -> Result<f64> {
    let re = Regex::new(r"^Duration:\s*(?P<h>[0-9]+):(?P<m>[0-9]{1,2}):(?P<s>[0-9]{1,2}(?:\.[0-9]+)?)")
        .expect("Error building duration regex");

    let parse_err = || Error::Parse {
        what: "duration",
        input: text.lines().find(|x| x.contains("Duration")).unwrap_or(text).trim().to_string(),
    };

    // only the first marker counts, later ones may belong to other inputs
    let first = text.find("Duration:").ok_or_else(parse_err)?;
    let captures = re.captures(&text[first..]).ok_or_else(parse_err)?;

    let hours: f64 = captures["h"].parse().map_err(|_| parse_err())?;
    let minutes: f64 = captures["m"].parse().map_err(|_| parse_err())?;
    let seconds: f64 = captures["s"].parse().map_err(|_| parse_err())?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Parse `ffprobe -show_entries format=duration -of json` output
pub fn parse_probe_duration(json: &str) -> Result<f64> {
    let parse_err = || Error::Parse {
        what: "probe duration",
        input: json.trim().to_string(),
    };

    let data: serde_json::Value = serde_json::from_str(json).map_err(|_| parse_err())?;

    // ffprobe prints numbers as strings in json
    let duration = data["format"]["duration"]
        .as_str()
        .and_then(|x| x.parse::<f64>().ok())
        .ok_or_else(parse_err)?;

    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(parse_err())
    }
}
