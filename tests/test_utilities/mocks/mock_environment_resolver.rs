use conda_tree::prelude::*;
use std::path::PathBuf;

/// Mock EnvironmentResolver standing in for `conda info --envs --json`
pub struct MockEnvironmentResolver {
    info: CondaInfo,
}

impl MockEnvironmentResolver {
    pub fn new(default_prefix: &str, envs_dir: &str, envs: &[&str]) -> Self {
        Self {
            info: CondaInfo {
                active_prefix: None,
                default_prefix: Some(PathBuf::from(default_prefix)),
                envs_dirs: vec![PathBuf::from(envs_dir)],
                envs: envs.iter().map(PathBuf::from).collect(),
            },
        }
    }

    pub fn with_active_prefix(mut self, prefix: &str) -> Self {
        self.info.active_prefix = Some(PathBuf::from(prefix));
        self
    }
}

impl EnvironmentResolver for MockEnvironmentResolver {
    fn conda_info(&self) -> Result<CondaInfo> {
        Ok(self.info.clone())
    }
}
