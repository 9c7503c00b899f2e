use std::path::PathBuf;
use anyhow::{Context, Result};
use libvbatch::{split_recording, Ffmpeg, SegmentNaming, SplitOptions, StartTime};

use crate::cli;

pub fn split_cmd(engine: &Ffmpeg, args: cli::SplitArgs) -> Result<()> {
    let source = PathBuf::from(format!("{}.mp4", args.input));

    // only the name of this file is used, it does not need to exist
    let start_name = args.start_from.unwrap_or_else(|| format!("{}_000000.mp4", args.input));
    let start = StartTime::from_filename(&start_name, args.date_order)
        .with_context(|| format!("Error reading start time from {:?}", start_name))?;

    println!("Recording started at {}", start);

    let options = SplitOptions {
        source,
        start,
        segment_secs: args.segment,
        naming: SegmentNaming::new(args.name_format)?,
        output_dir: args.output_dir,
    };

    split_recording(engine, &options, |segment| {
        println!("Created segment: {}", segment.output.display());
    }).with_context(|| format!("Error splitting video {:?}", options.source))?;

    Ok(())
}
