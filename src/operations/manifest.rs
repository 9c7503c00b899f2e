use std::{fs, path::{Path, PathBuf}};
use tracing::debug;
use crate::error::{Error, Result};

/// Default location of the concat list, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "filelist.txt";

/// List regular files in `dir` with extension `extension`, sorted by file name
///
/// Extension match is case-sensitive and without the leading dot
pub fn collect_media_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let fs_err = |source| Error::Filesystem {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = vec![];
    for entry in fs::read_dir(dir).map_err(fs_err)? {
        let entry = entry.map_err(fs_err)?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|x| x == extension) {
            files.push(path);
        }
    }

    // everything is inside the same dir so only the name decides the order
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(?dir, count = files.len(), "collected media files");

    Ok(files)
}

/// Render the concat demuxer list, one `file '<path>'` line per file
pub fn render_manifest(files: &[impl AsRef<Path>]) -> String {
    let mut list = String::new();
    for file in files {
        list.push_str("file '");
        // a quote has to close the string, get escaped and reopen it
        list.push_str(&file.as_ref().to_string_lossy().replace('\'', r"'\''"));
        list.push_str("'\n");
    }

    list
}

/// Write the manifest to `path` replacing anything that was there
pub fn write_manifest(path: &Path, files: &[impl AsRef<Path>]) -> Result<()> {
    fs::write(path, render_manifest(files)).map_err(|source| Error::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}
