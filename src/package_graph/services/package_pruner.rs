use crate::package_graph::domain::{DependencyGraph, SearchDirection};
use crate::package_graph::policies::ExcludePatterns;
use crate::shared::Result;
use std::collections::BTreeSet;

/// PackagePruner - removes a package together with everything that only it
/// depends on
///
/// A descendant survives if some package outside the pruned subtree still
/// reaches it without passing through the pruned package. Traversals are
/// breadth-first over explicit queues, so deep graphs cannot overflow the
/// stack.
pub struct PackagePruner;

impl PackagePruner {
    /// Prunes `package`; returns the removed names, sorted
    pub fn prune(graph: &mut DependencyGraph, package: &str) -> Result<Vec<String>> {
        let removed = Self::exclusive_subtree(graph, package)?;

        for name in &removed {
            graph.remove_package(name)?;
        }

        tracing::debug!(package, removed = removed.len(), "pruned package subtree");
        Ok(removed)
    }

    /// Prunes every package whose name matches `patterns`
    pub fn prune_matching(
        graph: &mut DependencyGraph,
        patterns: &ExcludePatterns,
    ) -> Result<Vec<String>> {
        let targets: Vec<String> = patterns
            .select(graph.package_names())
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut removed = Vec::new();
        for target in targets {
            // An earlier prune may already have taken it
            if graph.contains(&target) {
                removed.extend(Self::prune(graph, &target)?);
            }
        }
        removed.sort();
        Ok(removed)
    }

    fn exclusive_subtree(graph: &DependencyGraph, package: &str) -> Result<Vec<String>> {
        let descendants = graph.reachable(package, SearchDirection::Down)?;

        let outside = graph
            .package_names()
            .into_iter()
            .filter(|name| *name != package && !descendants.contains(name));
        let still_reached = graph.reachable_avoiding(outside, package);

        let mut removed: BTreeSet<&str> = descendants
            .into_iter()
            .filter(|name| !still_reached.contains(name))
            .collect();
        removed.insert(package);

        Ok(removed.into_iter().map(str::to_string).collect())
    }
}
