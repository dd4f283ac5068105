pub mod dependency_graph;
pub mod package_record;

pub use dependency_graph::{DependencyGraph, PackageNode, SearchDirection};
pub use package_record::{DependencyConstraint, PackageRecord, PackageRecords, VersionSpec};
