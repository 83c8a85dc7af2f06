use crate::config::ConflictPolicy;
use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Moves a processed URL file into `processed_dir`, keeping its name.
///
/// A plain rename is tried first. Only when the two directories live on
/// different filesystems is the file copied and the source removed
/// afterwards. A fallback that fails halfway is rolled back, so the file is
/// never left in both places or truncated at the destination.
///
/// # Errors
/// * [`AppError::ArchiveConflict`] when the destination exists and `policy` is
///   [`ConflictPolicy::Fail`]; nothing is moved in that case
/// * [`AppError::Io`] if the rename fails for another reason, or the copy
///   fallback fails
pub async fn archive(src: &Path, processed_dir: &Path, policy: ConflictPolicy) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| format!("Not a file path: {}", src.display()))?;
    let destination = processed_dir.join(name);

    if policy == ConflictPolicy::Fail && tokio::fs::try_exists(&destination).await? {
        return Err(AppError::ArchiveConflict(destination));
    }

    match tokio::fs::rename(src, &destination).await {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => {
            debug!("Rename across filesystems ({}), copying instead", e);
            copy_then_remove(src, &destination).await?;
        }
        Err(e) => return Err(e.into()),
    }

    info!("Moved {} to {}", src.display(), destination.display());
    Ok(destination)
}

#[cfg(unix)]
fn is_cross_device(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(windows)]
fn is_cross_device(err: &std::io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &std::io::Error) -> bool {
    false
}

async fn copy_then_remove(src: &Path, destination: &Path) -> std::io::Result<()> {
    if let Err(e) = tokio::fs::copy(src, destination).await {
        let _ = tokio::fs::remove_file(destination).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::remove_file(src).await {
        let _ = tokio::fs::remove_file(destination).await;
        return Err(e);
    }
    Ok(())
}
