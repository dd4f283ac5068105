use crate::ports::outbound::PrefixFileLister;
use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// PrefixWalker adapter listing the files present in an environment prefix
///
/// Links are never followed. A symlink is listed like a file unless it
/// points at a directory.
pub struct PrefixWalker;

impl PrefixWalker {
    pub fn new() -> Self {
        Self
    }

    fn is_skipped_top_level_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
        entry.depth() == 1
            && entry.file_type().is_dir()
            && skip_dirs
                .iter()
                .any(|skip| entry.file_name().to_str() == Some(skip.as_str()))
    }

    /// Joins path components with `/`, the separator conda-meta records use.
    /// Other characters, backslashes included, are kept as they are.
    fn slash_path(relative: &Path) -> String {
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_listed(entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
    }
}

impl Default for PrefixWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixFileLister for PrefixWalker {
    fn list_files(&self, prefix: &Path, skip_dirs: &[String]) -> Result<Vec<String>> {
        let walker = WalkDir::new(prefix)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !Self::is_skipped_top_level_dir(entry, skip_dirs));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| CondaTreeError::FileReadError {
                path: e.path().unwrap_or(prefix).to_path_buf(),
                details: e.to_string(),
            })?;
            if !Self::is_listed(&entry) {
                continue;
            }
            let relative = entry.path().strip_prefix(prefix).unwrap_or(entry.path());
            files.push(Self::slash_path(relative));
        }

        tracing::debug!(prefix = %prefix.display(), count = files.len(), "listed prefix files");
        Ok(files)
    }
}
