use crate::shared::Result;
use std::path::Path;

/// PrefixFileLister port for enumerating files installed in an environment
pub trait PrefixFileLister {
    /// Lists regular files under `prefix` as `/`-separated relative paths
    ///
    /// Any top-level directory named in `skip_dirs` is left out entirely.
    ///
    /// # Errors
    /// Returns an error if the prefix cannot be traversed
    fn list_files(&self, prefix: &Path, skip_dirs: &[String]) -> Result<Vec<String>>;
}
