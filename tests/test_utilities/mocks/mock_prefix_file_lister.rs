use conda_tree::prelude::*;
use std::path::Path;

/// Mock PrefixFileLister returning a fixed file list, honouring skip_dirs
pub struct MockPrefixFileLister {
    files: Vec<String>,
}

impl MockPrefixFileLister {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl PrefixFileLister for MockPrefixFileLister {
    fn list_files(&self, _prefix: &Path, skip_dirs: &[String]) -> Result<Vec<String>> {
        Ok(self
            .files
            .iter()
            .filter(|file| {
                let top = file.split('/').next().unwrap_or_default();
                !skip_dirs.iter().any(|skip| skip == top)
            })
            .cloned()
            .collect())
    }
}
