use std::path::PathBuf;

/// User inputs that pick which environment to inspect, in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSelector {
    /// `--prefix`
    pub prefix: Option<PathBuf>,
    /// `--name`
    pub name: Option<String>,
    /// Value of `$CONDA_PREFIX`
    pub conda_prefix_env: Option<PathBuf>,
}
