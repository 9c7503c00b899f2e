use std::path::PathBuf;
use clap::{Parser, Subcommand, Args};
use libvbatch::{DateOrder, DEFAULT_MANIFEST, DEFAULT_NAME_FORMAT};

/// Batch merging and splitting of video recordings using ffmpeg, without re-encoding
#[derive(Parser, Debug)]
#[command(name = "vbatch", author, version, about)]
pub struct Cli {
    /// Just print commands that would've been ran, do not modify filesystem
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// ffmpeg binary to use
    #[arg(long, global = true, env = "VBATCH_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// ffprobe binary to use
    #[arg(long, global = true, env = "VBATCH_FFPROBE", default_value = "ffprobe")]
    pub ffprobe: PathBuf,

    #[command(subcommand)]
    pub cmd: CliCommands,
}

#[derive(Subcommand, Debug)]
pub enum CliCommands {
    // NOTE no command should operate on file in place, always output to a new one

    /// Concatenate all videos in a folder into `<folder>_<out>.mp4`
    Merge(MergeArgs),

    /// Split `<input>.mp4` into segments named after their start time
    Split(SplitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Path to the folder containing video files
    #[arg(long)]
    pub input: PathBuf,

    /// Name of the output merged video file
    #[arg(long)]
    pub out: String,

    /// Extension of the video files to merge
    #[arg(long, default_value = "mp4")]
    pub extension: String,

    /// Where to write the list of files for ffmpeg
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Recording name without extension, `<input>.mp4` is split and the start time is read from
    /// `<input>_000000.mp4`
    #[arg(long)]
    pub input: String,

    /// Read the start time from this file name instead
    #[arg(long)]
    pub start_from: Option<String>,

    /// Length of each segment (for detailed format see help)
    #[arg(long, default_value = "01:00:00", value_parser = parse_time)]
    pub segment: u64,

    /// Order of date fields in the file name, `day-first` (DDMMYY) or `year-first` (YYMMDD)
    #[arg(long, default_value = "day-first")]
    pub date_order: DateOrder,

    /// strftime pattern for segment file names
    #[arg(long, default_value = DEFAULT_NAME_FORMAT)]
    pub name_format: String,

    /// Directory to write segments into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Parse segment length in whole seconds, either a timestamp `01:00:00` or integer with unit
/// suffix `90m`
pub fn parse_time(input: &str) -> Result<u64, String> {
    use regex;

    let re = regex::Regex::new(
        r#"(?x)
        ^
        (?:
            # basically just match a timestamp 00:00:00
            (?P<h>[0-9]+)
            :
            (?P<m>[0-9]+)
            :
            (?P<s>[0-9]+)
        )
        |
        (?:
            # match integer and optional unit (ascii only) 3600[s]
            (?P<int>[0-9]+)
            (?P<unit>[[:alpha:]])?
        )
        $"#
    ).expect("Error building parse_time regex");

    let number = |x: &str| x.parse::<u64>().map_err(|_| format!("Number too large {:#?}", x));

    let seconds = if let Some(captures) = re.captures(input) {
        if let Some(hours) = captures.name("h") {
            let hours = number(hours.as_str())?;
            let minutes = number(&captures["m"])?;
            let seconds = number(&captures["s"])?;

            hours.checked_mul(3600)
                .and_then(|x| x.checked_add(minutes.checked_mul(60)?))
                .and_then(|x| x.checked_add(seconds))
                .ok_or_else(|| "Time too large".to_string())?
        } else {
            let integer = number(&captures["int"])?;

            let multiplier = match captures.name("unit").map(|x| x.as_str()) {
                Some("h") => 3600,
                Some("m") => 60,
                // default to seconds if no unit
                Some("s") | None => 1,
                Some(x) => return Err(format!("Invalid unit suffix {:#?}", x)),
            };

            integer.checked_mul(multiplier).ok_or_else(|| "Time too large".to_string())?
        }
    } else {
        return Err("Invalid time format".to_string());
    };

    match seconds {
        0 => Err("Segment length has to be positive".to_string()),
        x => Ok(x),
    }
}
