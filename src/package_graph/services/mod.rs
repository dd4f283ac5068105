mod cycle_finder;
mod dot_exporter;
mod file_ownership;
mod graph_builder;
mod graph_queries;
mod package_pruner;
mod tree_renderer;

pub use cycle_finder::CycleFinder;
pub use dot_exporter::DotExporter;
pub use file_ownership::{FileOwner, FileOwnership};
pub use graph_builder::GraphBuilder;
pub use graph_queries::GraphQueries;
pub use package_pruner::PackagePruner;
pub use tree_renderer::{RenderedTree, TreeOptions, TreeRenderer};
