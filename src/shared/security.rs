use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for any metadata or config file read by the tool (64 MB)
///
/// Records of very large packages list tens of thousands of files, which
/// stays far below this.
pub const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Reads a small text file after checking it is a regular file of bounded
/// size
///
/// Symbolic links are followed only when they resolve to a regular file.
///
/// # Errors
/// Returns `CondaTreeError::FileReadError` if:
/// - The path doesn't exist or its metadata cannot be read
/// - The path is not a regular file
/// - The file exceeds `MAX_FILE_SIZE`
/// - The contents are not valid UTF-8
pub fn read_bounded_file(path: &Path) -> Result<String> {
    let read_error = |details: String| CondaTreeError::FileReadError {
        path: path.to_path_buf(),
        details,
    };

    let metadata = fs::metadata(path).map_err(|e| read_error(e.to_string()))?;

    if !metadata.is_file() {
        return Err(read_error("not a regular file".to_string()).into());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    Ok(fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(CondaTreeError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "file is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
        }
        .into());
    }
    Ok(())
}

/// Rejects writing through a symbolic link
///
/// # Errors
/// Returns `CondaTreeError::FileWriteError` if `path` exists and is a
/// symbolic link
pub fn validate_not_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(CondaTreeError::FileWriteError {
            path: path.to_path_buf(),
            details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}
