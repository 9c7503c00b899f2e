use std::path::Path;
use tracing::{debug, warn};
use crate::{engine::MediaEngine, error::Result};

/// Sum durations of all files, stopping at the first file whose duration cannot be read
pub fn total_duration(engine: &impl MediaEngine, files: &[impl AsRef<Path>]) -> Result<f64> {
    files.iter().try_fold(0.0, |total, file| {
        let file = file.as_ref();
        let duration = engine.scan_duration(file)
            .inspect_err(|err| warn!(?file, %err, "could not read duration"))?;

        debug!(?file, duration, "scanned duration");

        Ok(total + duration)
    })
}
