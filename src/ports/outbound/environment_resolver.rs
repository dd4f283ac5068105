use crate::shared::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Subset of `conda info --envs --json` needed to locate environments
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CondaInfo {
    #[serde(default)]
    pub active_prefix: Option<PathBuf>,
    #[serde(default)]
    pub default_prefix: Option<PathBuf>,
    #[serde(default)]
    pub envs_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub envs: Vec<PathBuf>,
}

/// EnvironmentResolver port for querying the conda installation
pub trait EnvironmentResolver {
    /// Asks conda for its environment layout
    ///
    /// # Errors
    /// Returns an error if conda cannot be run or its output is not the
    /// expected JSON document
    fn conda_info(&self) -> Result<CondaInfo>;
}
