use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists the URL files waiting in `dir`.
///
/// Only regular files whose name ends in `.txt` are returned, in whatever
/// order the filesystem yields them. Subdirectories are not entered.
pub async fn scan_input_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_url_file(&path) {
            debug!("Ignoring {}", path.display());
            continue;
        }
        // follows symlinks; dangling links and unstattable entries are skipped
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => debug!("Ignoring non-file {}", path.display()),
            Err(e) => debug!("Ignoring {}: {}", path.display(), e),
        }
    }

    Ok(files)
}

fn is_url_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(b".txt"))
}

/// Reads the URLs of one input file.
///
/// Every line is one entry, trimmed of surrounding whitespace. Blank lines
/// are kept as empty entries and end up skipped like any unknown URL.
pub async fn read_urls(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .collect())
}
