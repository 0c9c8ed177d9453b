//! Output directory helpers

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every `*.html` file under `dir`, sorted for deterministic processing
pub fn html_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("html"))
                .unwrap_or(false)
        })
        .collect();

    paths.sort();
    paths
}

/// Write `updated` to `path` unless it equals `original`.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, original: &str, updated: &str) -> io::Result<bool> {
    if original == updated {
        return Ok(false);
    }
    fs::write(path, updated)?;
    tracing::debug!("Rewrote: {:?}", path);
    Ok(true)
}
