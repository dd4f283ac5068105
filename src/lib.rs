//! conda-tree - dependency graph inspector for conda environments
//!
//! This library reads the package records of a conda environment
//! (`<prefix>/conda-meta/*.json`), builds a dependency graph, and answers
//! questions about it: leaves, cycles, dependencies and dependents, trees,
//! Graphviz export, and file ownership.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`package_graph`): the dependency graph, its services and policies
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use conda_tree::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let use_case = InspectEnvironmentUseCase::new(
//!     CondaMetaReader::new(),
//!     PrefixWalker::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = InspectRequest::builder()
//!     .prefix("/opt/conda/envs/work")
//!     .query(Query::Leaves {
//!         with_cycles: true,
//!         export: false,
//!     })
//!     .build()?;
//!
//! let response = use_case.execute(request)?;
//! StdoutPresenter::new().present(&response.content)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod package_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CondaMetaReader, FileSystemWriter, PrefixWalker, StdoutPresenter,
    };
    pub use crate::adapters::outbound::process::CondaInfoResolver;
    pub use crate::application::dto::{
        InspectRequest, InspectResponse, ListingMode, PrefixSelector, Query, TreeFlags,
    };
    pub use crate::application::use_cases::{InspectEnvironmentUseCase, ResolvePrefixUseCase};
    pub use crate::package_graph::domain::{
        DependencyGraph, PackageRecord, PackageRecords, SearchDirection,
    };
    pub use crate::package_graph::policies::{CollapsePolicy, ExcludePatterns};
    pub use crate::package_graph::services::{
        CycleFinder, DotExporter, FileOwnership, GraphBuilder, GraphQueries, PackagePruner,
        TreeOptions, TreeRenderer,
    };
    pub use crate::ports::outbound::{
        CondaInfo, EnvironmentResolver, OutputPresenter, PackageCacheReader, PrefixFileLister,
        ProgressReporter,
    };
    pub use crate::shared::Result;
}
