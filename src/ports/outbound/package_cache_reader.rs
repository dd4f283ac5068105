use crate::package_graph::domain::PackageRecords;
use crate::shared::Result;
use std::path::Path;

/// PackageCacheReader port for loading installed package records
///
/// This port abstracts how the package metadata of an environment is read,
/// keyed by package name.
pub trait PackageCacheReader {
    /// Reads every package record installed under `prefix`
    ///
    /// # Arguments
    /// * `prefix` - Root directory of the conda environment
    ///
    /// # Errors
    /// Returns an error if:
    /// - The prefix has no package metadata directory
    /// - A metadata file cannot be read or parsed
    fn read_records(&self, prefix: &Path) -> Result<PackageRecords>;
}
