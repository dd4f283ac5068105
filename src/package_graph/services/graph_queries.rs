use super::CycleFinder;
use crate::package_graph::domain::{DependencyGraph, SearchDirection};
use crate::shared::Result;

/// GraphQueries service answering leaf and reachability questions
///
/// Every query naming a package that is absent from the graph fails with
/// `CondaTreeError::NotFound`.
pub struct GraphQueries;

impl GraphQueries {
    /// Packages nothing else depends on, sorted by name
    pub fn leaves(graph: &DependencyGraph) -> Vec<String> {
        graph
            .package_names()
            .into_iter()
            .filter(|name| matches!(graph.in_degree(name), Ok(0)))
            .map(str::to_string)
            .collect()
    }

    /// Leaves plus one representative per simple cycle that no earlier root
    /// reaches.
    ///
    /// The representative is the first element of the cycle as enumerated by
    /// [`CycleFinder`], i.e. its lexicographically smallest member. Roots
    /// added for earlier cycles count as existing roots, so two cycles in the
    /// same orphan component yield a single representative.
    pub fn leaves_with_cycles(graph: &DependencyGraph) -> Result<Vec<String>> {
        let mut roots = Self::leaves(graph);

        for cycle in CycleFinder::simple_cycles(graph)? {
            let Some(representative) = cycle.into_iter().next() else {
                continue;
            };
            let sources: Vec<&str> = roots.iter().map(String::as_str).collect();
            if !graph.is_reachable_from_any(&sources, &representative)? {
                tracing::debug!(package = %representative, "adding orphan cycle as root");
                roots.push(representative);
            }
        }

        Ok(roots)
    }

    /// Direct dependencies (down) or direct dependents (up)
    pub fn direct(
        graph: &DependencyGraph,
        package: &str,
        direction: SearchDirection,
    ) -> Result<Vec<String>> {
        Ok(graph
            .neighbors(package, direction)?
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Descendants (down) or ancestors (up), sorted, excluding `package`
    pub fn recursive(
        graph: &DependencyGraph,
        package: &str,
        direction: SearchDirection,
    ) -> Result<Vec<String>> {
        Ok(graph
            .reachable(package, direction)?
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}
