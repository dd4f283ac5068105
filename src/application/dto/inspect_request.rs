use super::Query;
use crate::package_graph::policies::DEFAULT_COLLAPSE_PACKAGES;
use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use std::path::PathBuf;

/// InspectRequest - Internal request DTO for the inspect use case
///
/// Built through [`InspectRequest::builder`], which rejects a request with
/// no prefix or no query.
#[derive(Debug, Clone)]
pub struct InspectRequest {
    /// Root of the conda environment to inspect
    pub prefix: PathBuf,
    pub query: Query,
    /// Package name patterns pruned from the graph before querying
    pub exclude_patterns: Vec<String>,
    /// Packages never expanded in small tree mode
    pub collapse_packages: Vec<String>,
    /// Extra top-level directories ignored by `unowned-files`
    pub skip_dirs: Vec<String>,
    /// Refuse to render trees of cyclic graphs
    pub strict_acyclic: bool,
    /// Emit ANSI styling in tree output
    pub color: bool,
}

impl InspectRequest {
    pub fn builder() -> InspectRequestBuilder {
        InspectRequestBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct InspectRequestBuilder {
    prefix: Option<PathBuf>,
    query: Option<Query>,
    exclude_patterns: Vec<String>,
    collapse_packages: Option<Vec<String>>,
    skip_dirs: Vec<String>,
    strict_acyclic: bool,
    color: bool,
}

impl InspectRequestBuilder {
    pub fn prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn collapse_packages(mut self, packages: Vec<String>) -> Self {
        self.collapse_packages = Some(packages);
        self
    }

    pub fn skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = dirs;
        self
    }

    pub fn strict_acyclic(mut self, strict: bool) -> Self {
        self.strict_acyclic = strict;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// # Errors
    /// `CondaTreeError::Validation` when the prefix or the query is missing
    pub fn build(self) -> Result<InspectRequest> {
        let prefix = self.prefix.ok_or_else(|| CondaTreeError::Validation {
            message: "an environment prefix is required".to_string(),
        })?;
        let query = self.query.ok_or_else(|| CondaTreeError::Validation {
            message: "a query is required".to_string(),
        })?;

        Ok(InspectRequest {
            prefix,
            query,
            exclude_patterns: self.exclude_patterns,
            collapse_packages: self.collapse_packages.unwrap_or_else(|| {
                DEFAULT_COLLAPSE_PACKAGES
                    .iter()
                    .map(|name| name.to_string())
                    .collect()
            }),
            skip_dirs: self.skip_dirs,
            strict_acyclic: self.strict_acyclic,
            color: self.color,
        })
    }
}
