use crate::package_graph::domain::{PackageRecord, PackageRecords};
use crate::ports::outbound::PackageCacheReader;
use crate::shared::error::CondaTreeError;
use crate::shared::security::read_bounded_file;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under an environment prefix holding one JSON record per package
pub const CONDA_META_DIR: &str = "conda-meta";

/// On-disk shape of a `conda-meta/*.json` record; other keys are ignored
#[derive(Debug, Deserialize)]
struct MetaRecord {
    name: String,
    version: String,
    #[serde(default)]
    depends: Vec<String>,
    #[serde(default)]
    files: Vec<String>,
}

/// CondaMetaReader adapter reading package records from `<prefix>/conda-meta`
///
/// This adapter implements the PackageCacheReader port. Files without a
/// `.json` extension (such as `history`) are skipped.
pub struct CondaMetaReader;

impl CondaMetaReader {
    pub fn new() -> Self {
        Self
    }

    fn record_paths(meta_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(meta_dir).map_err(|e| CondaTreeError::FileReadError {
            path: meta_dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CondaTreeError::FileReadError {
                    path: meta_dir.to_path_buf(),
                    details: e.to_string(),
                })?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn parse_record(path: &Path) -> Result<PackageRecord> {
        let content = read_bounded_file(path)?;
        let parse_error = |details: String| CondaTreeError::RecordParseError {
            path: path.to_path_buf(),
            details,
        };

        let raw: MetaRecord =
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

        Ok(PackageRecord::new(raw.name, raw.version, raw.depends, raw.files)
            .map_err(|e| parse_error(e.to_string()))?)
    }
}

impl Default for CondaMetaReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageCacheReader for CondaMetaReader {
    fn read_records(&self, prefix: &Path) -> Result<PackageRecords> {
        let meta_dir = prefix.join(CONDA_META_DIR);
        if !meta_dir.is_dir() {
            return Err(CondaTreeError::InvalidPrefix {
                path: prefix.to_path_buf(),
                reason: format!("no '{}' directory found", CONDA_META_DIR),
            }
            .into());
        }

        let mut records = PackageRecords::new();
        for path in Self::record_paths(&meta_dir)? {
            let record = Self::parse_record(&path)?;
            if let Some(previous) = records.insert(record.name().to_string(), record) {
                tracing::warn!(
                    package = previous.name(),
                    path = %path.display(),
                    "duplicate package record, keeping the last one read"
                );
            }
        }

        tracing::debug!(
            prefix = %prefix.display(),
            count = records.len(),
            "loaded package records"
        );
        Ok(records)
    }
}
