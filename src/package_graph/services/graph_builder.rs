use crate::package_graph::domain::{DependencyGraph, PackageRecords};

/// GraphBuilder service turning installed package records into a graph
///
/// Pure: no I/O, never fails. Dependency targets missing from the records
/// still become (unversioned) nodes so the graph stays traversable.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(records: &PackageRecords) -> DependencyGraph {
        let mut graph = DependencyGraph::new();

        for record in records.values() {
            graph.add_package(record.name(), record.version());

            for constraint in record.constraints() {
                let (target, spec) = constraint.into_parts();
                graph.add_dependency(record.name(), &target, spec);
            }
        }

        tracing::debug!(
            packages = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        graph
    }
}
