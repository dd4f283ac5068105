use std::collections::BTreeSet;

/// Packages nearly everything depends on; in small mode their subtrees are
/// never expanded
pub const DEFAULT_COLLAPSE_PACKAGES: [&str; 2] = ["python", "conda"];

/// CollapsePolicy - names whose children are hidden in small tree mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsePolicy {
    names: BTreeSet<String>,
}

impl CollapsePolicy {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn collapses(&self, package: &str) -> bool {
        self.names.contains(package)
    }
}

impl Default for CollapsePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSE_PACKAGES)
    }
}
