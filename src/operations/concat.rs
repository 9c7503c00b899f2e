use std::path::{Component, Path, PathBuf};
use tracing::info;
use crate::{engine::MediaEngine, error::{Error, Result}};
use super::{duration::total_duration, manifest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Directory with the segments to merge
    pub input: PathBuf,

    /// Output name, the result is `<input dir name>_<stem>.mp4` next to the input dir
    pub stem: String,

    /// Extension of media files to pick up
    pub extension: String,

    /// Where to write the concat list
    pub manifest: PathBuf,

    /// Print the manifest instead of writing it
    pub dry_run: bool,
}

impl MergeOptions {
    pub fn new(input: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            stem: stem.into(),
            extension: "mp4".into(),
            manifest: PathBuf::from(manifest::DEFAULT_MANIFEST),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Files in the order they were concatenated
    pub files: Vec<PathBuf>,

    /// Sum of durations of all source files in seconds
    pub total_duration: f64,

    pub output: PathBuf,
}

/// Absolute form of `path` with `.` and `..` resolved lexically, symlinks are left alone
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| Error::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;

    let mut normal = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                normal.pop();
            },
            x => normal.push(x),
        }
    }

    Ok(normal)
}

/// Output path of a merge, `<dir>_<stem>.mp4` placed next to `dir`
///
/// `dir` is made absolute first so `.` or `..` still name a real directory
pub fn merged_output_path(dir: &Path, stem: &str) -> Result<PathBuf> {
    let dir = normalize(dir)?;

    match (dir.file_name(), dir.parent()) {
        (Some(name), Some(parent)) => Ok(parent.join(format!("{}_{}.mp4", name.to_string_lossy(), stem))),
        // only the root has no name
        _ => Err(Error::format(dir.to_string_lossy(), "input directory has no name")),
    }
}

/// Concatenate all media files in a directory into a single file without re-encoding
pub fn merge_folder(engine: &impl MediaEngine, options: &MergeOptions) -> Result<MergeReport> {
    let output = merged_output_path(&options.input, &options.stem)?;

    let mut files = vec![];
    let mut entries = vec![];
    for file in manifest::collect_media_files(&options.input, &options.extension)? {
        // relative entries would be resolved against the manifest location by the engine
        let entry = normalize(&file)?;

        // never feed a previous result back in
        if entry == output {
            continue;
        }

        files.push(file);
        entries.push(entry);
    }

    if files.is_empty() {
        return Err(Error::EmptyInput { dir: options.input.clone() });
    }

    if options.dry_run {
        print!("{}", manifest::render_manifest(&entries));
    } else {
        manifest::write_manifest(&options.manifest, &entries)?;
    }
    info!(manifest = ?options.manifest, count = files.len(), "wrote manifest");

    let total_duration = total_duration(engine, &files)?;

    engine.concat(&options.manifest, &output)?;

    Ok(MergeReport {
        files,
        total_duration,
        output,
    })
}
