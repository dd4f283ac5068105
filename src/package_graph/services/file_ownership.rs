use crate::package_graph::domain::PackageRecords;
use std::collections::HashSet;

/// A file claimed by an installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOwner<'r> {
    pub package: &'r str,
    pub version: &'r str,
    pub file: &'r str,
}

/// FileOwnership service cross-referencing prefix files against the file
/// lists of installed packages
pub struct FileOwnership;

impl FileOwnership {
    /// Files present under the prefix that no package claims, sorted.
    ///
    /// `present` holds `/`-separated paths relative to the prefix.
    pub fn unowned(present: Vec<String>, records: &PackageRecords) -> Vec<String> {
        let owned: HashSet<&str> = records
            .values()
            .flat_map(|record| record.files())
            .map(String::as_str)
            .collect();

        let mut unowned: Vec<String> = present
            .into_iter()
            .filter(|path| !owned.contains(path.as_str()))
            .collect();
        unowned.sort();
        unowned
    }

    /// Linear scan for files matching `pattern` as a substring in either
    /// direction. A path may have several owners.
    pub fn owners<'r>(records: &'r PackageRecords, pattern: &str) -> Vec<FileOwner<'r>> {
        records
            .values()
            .flat_map(|record| {
                record
                    .files()
                    .iter()
                    .filter(|file| file.contains(pattern) || pattern.contains(file.as_str()))
                    .map(move |file| FileOwner {
                        package: record.name(),
                        version: record.version(),
                        file,
                    })
            })
            .collect()
    }
}
