mod util;
mod error;
pub mod engine;
pub mod operations;

pub use error::{Error, Result};
pub use util::{format_clock, format_hms};

pub use engine::{Ffmpeg, MediaEngine};
pub use operations::manifest::{collect_media_files, render_manifest, write_manifest, DEFAULT_MANIFEST};
pub use operations::duration::total_duration;
pub use operations::concat::{merge_folder, merged_output_path, MergeOptions, MergeReport};
pub use operations::timestamp::{DateOrder, StartTime};
pub use operations::split::{
    plan_segments, segment_count, split_recording,
    Segment, SegmentNaming, SplitOptions, DEFAULT_NAME_FORMAT, DEFAULT_SEGMENT_SECS,
};
