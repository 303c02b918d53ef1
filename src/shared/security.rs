use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a cache entry or settings file read from disk (64 MB).
/// Release lists for long-lived channels are a few MB; anything far larger is not ours.
pub const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum length of a downloaded artifact's file name
const MAX_FILE_NAME_LENGTH: usize = 255;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates a file name suggested by the release catalog before it is joined
/// onto the download directory.
///
/// The name comes from remote JSON, so it must not be able to escape the
/// directory it is written into.
///
/// # Errors
/// Returns an error if the name is empty, too long, or contains path separators or `..`
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Security: download file name is empty");
    }

    if name.len() > MAX_FILE_NAME_LENGTH {
        anyhow::bail!(
            "Security: download file name is too long ({} bytes). Maximum allowed: {} bytes",
            name.len(),
            MAX_FILE_NAME_LENGTH
        );
    }

    if name.contains('/') || name.contains('\\') {
        anyhow::bail!(
            "Security: download file name '{}' contains path separators which are not allowed",
            name
        );
    }

    if name.contains("..") {
        anyhow::bail!(
            "Security: download file name '{}' contains '..' which is not allowed",
            name
        );
    }

    Ok(())
}
