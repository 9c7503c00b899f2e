use anyhow::{Context, Result};
use libvbatch::{format_hms, merge_folder, Error, Ffmpeg, MergeOptions};

use crate::cli;

pub fn merge_cmd(engine: &Ffmpeg, args: cli::MergeArgs) -> Result<()> {
    let options = MergeOptions {
        input: args.input,
        stem: args.out,
        extension: args.extension,
        manifest: args.manifest,
        dry_run: engine.dry_run,
    };

    let report = match merge_folder(engine, &options) {
        Ok(x) => x,
        Err(Error::EmptyInput { .. }) => {
            // nothing to do is not a failure
            println!("No video files found in the folder.");
            return Ok(());
        },
        Err(err) => return Err(err).with_context(|| format!("Error merging videos from {:?}", options.input)),
    };

    println!("Total duration of original videos: {}", format_hms(report.total_duration));
    println!("Successfully merged {} videos into {}", report.files.len(), report.output.display());

    Ok(())
}
