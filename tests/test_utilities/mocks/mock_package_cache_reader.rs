use conda_tree::prelude::*;
use std::path::Path;

/// Mock PackageCacheReader serving records built in memory
#[derive(Default)]
pub struct MockPackageCacheReader {
    records: PackageRecords,
    fail_with: Option<String>,
}

impl MockPackageCacheReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, version: &str, depends: &[&str]) -> Self {
        self.insert(name, version, depends, &[]);
        self
    }

    pub fn with_files(mut self, name: &str, version: &str, files: &[&str]) -> Self {
        self.insert(name, version, &[], files);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn insert(&mut self, name: &str, version: &str, depends: &[&str], files: &[&str]) {
        let record = PackageRecord::new(
            name.to_string(),
            version.to_string(),
            depends.iter().map(|d| d.to_string()).collect(),
            files.iter().map(|f| f.to_string()).collect(),
        )
        .unwrap();
        self.records.insert(name.to_string(), record);
    }
}

impl PackageCacheReader for MockPackageCacheReader {
    fn read_records(&self, _prefix: &Path) -> Result<PackageRecords> {
        match &self.fail_with {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.records.clone()),
        }
    }
}
