use std::{collections::HashSet, path::{Path, PathBuf}};
use chrono::format::{Item, StrftimeItems};
use tracing::info;
use crate::{engine::MediaEngine, error::{Error, Result}};
use super::timestamp::StartTime;

/// One hour
pub const DEFAULT_SEGMENT_SECS: u64 = 3600;

/// Default naming of segments, every field comes from the segment start time
pub const DEFAULT_NAME_FORMAT: &str = "view1_%Y-%m-%d_%H-%M-%S.mp4";

/// strftime pattern used to name segments after their absolute start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentNaming(String);

impl SegmentNaming {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(Error::format(pattern, "segment name pattern is empty"));
        }

        // chrono panics while formatting invalid patterns so they are rejected here
        if StrftimeItems::new(&pattern).any(|x| matches!(x, Item::Error)) {
            return Err(Error::format(pattern, "invalid strftime specifier"));
        }

        Ok(Self(pattern))
    }

    pub fn render(&self, time: &StartTime) -> String {
        time.as_datetime().format(&self.0).to_string()
    }
}

impl Default for SegmentNaming {
    fn default() -> Self {
        Self(DEFAULT_NAME_FORMAT.to_string())
    }
}

/// Planned slice of the source recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: u64,

    /// Seconds from the start of the source
    pub offset: u64,

    /// Requested length in seconds, the last segment may ask for more than is left
    pub duration: u64,

    pub start: StartTime,
    pub output: PathBuf,
}

/// Number of segments to cut, always one more than what fits fully
///
/// The trailing segment may be shorter or even empty when `total` divides exactly, it is up to
/// the engine to stop at the end of the stream
pub fn segment_count(total: f64, segment_secs: u64) -> u64 {
    (total.max(0.0) / segment_secs as f64).floor() as u64 + 1
}

/// Compute all segments of a recording `total` seconds long that started at `start`
pub fn plan_segments(
    total: f64,
    segment_secs: u64,
    start: StartTime,
    naming: &SegmentNaming,
    output_dir: &Path,
) -> Result<Vec<Segment>> {
    if segment_secs == 0 {
        return Err(Error::format("0", "segment duration has to be positive"));
    }

    if !total.is_finite() || total < 0.0 {
        return Err(Error::format(total.to_string(), "total duration has to be a positive number"));
    }

    let segments = (0..segment_count(total, segment_secs))
        .map(|index| {
            let offset = index * segment_secs;
            let start = start.after(offset)?;

            Ok(Segment {
                index,
                offset,
                duration: segment_secs,
                output: output_dir.join(naming.render(&start)),
                start,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // the engine overwrites existing files, two segments must never share a name
    let mut seen = HashSet::new();
    if let Some(dup) = segments.iter().find(|x| !seen.insert(&x.output)) {
        return Err(Error::format(
            naming.0.clone(),
            format!("segments would share the output name {:?}", dup.output),
        ));
    }

    Ok(segments)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Recording to split
    pub source: PathBuf,

    /// Time the recording started at
    pub start: StartTime,

    pub segment_secs: u64,
    pub naming: SegmentNaming,

    /// Directory segments are written into
    pub output_dir: PathBuf,
}

impl SplitOptions {
    pub fn new(source: impl Into<PathBuf>, start: StartTime) -> Self {
        Self {
            source: source.into(),
            start,
            segment_secs: DEFAULT_SEGMENT_SECS,
            naming: SegmentNaming::default(),
            output_dir: PathBuf::new(),
        }
    }
}

/// Split a recording into fixed length segments named after their start time
///
/// Segments are cut in order, the first failure aborts the whole run. `on_segment` is called
/// after each segment is written
pub fn split_recording(
    engine: &impl MediaEngine,
    options: &SplitOptions,
    mut on_segment: impl FnMut(&Segment),
) -> Result<Vec<Segment>> {
    let total = engine.probe_duration(&options.source)?;

    let segments = plan_segments(
        total,
        options.segment_secs,
        options.start,
        &options.naming,
        &options.output_dir,
    )?;

    info!(source = ?options.source, total, count = segments.len(), "planned segments");

    for segment in segments.iter() {
        engine.extract_range(&options.source, segment.offset, segment.duration, &segment.output)?;
        on_segment(segment);
    }

    Ok(segments)
}
