use super::VersionSpec;
use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Which edges a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Follow dependency edges forward: what a package needs
    Down,
    /// Follow dependency edges backward: what needs a package
    Up,
}

impl SearchDirection {
    fn edge_direction(self) -> Direction {
        match self {
            SearchDirection::Down => Direction::Outgoing,
            SearchDirection::Up => Direction::Incoming,
        }
    }

    /// Plural noun for the packages this direction reaches
    pub fn relation_noun(self) -> &'static str {
        match self {
            SearchDirection::Down => "dependencies",
            SearchDirection::Up => "dependent packages",
        }
    }
}

/// Node weight: a package name and, when it is installed, its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    name: String,
    version: Option<String>,
}

impl PackageNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Directed dependency graph over package names.
///
/// An edge `A -> B` means "A depends on B" and carries the version spec from
/// A's constraint. Nodes are unique by name and at most one edge exists per
/// ordered pair. Cycles are allowed.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: StableDiGraph<PackageNode, VersionSpec>,
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an installed package, or records the version of a node that was
    /// first created as a dependency target
    pub fn add_package(&mut self, name: &str, version: &str) {
        let idx = self.ensure_node(name);
        self.graph[idx].version = Some(version.to_string());
    }

    /// Adds `from -> to`, creating either node if needed. An existing edge
    /// between the same pair has its spec replaced.
    pub fn add_dependency(&mut self, from: &str, to: &str, spec: VersionSpec) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge) => self.graph[edge] = spec,
            None => {
                self.graph.add_edge(from_idx, to_idx, spec);
            }
        }
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.index.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(PackageNode {
            name: name.to_string(),
            version: None,
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn node_index(&self, name: &str) -> Result<NodeIndex> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CondaTreeError::not_found(name).into())
    }

    fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn package(&self, name: &str) -> Result<&PackageNode> {
        let idx = self.node_index(name)?;
        Ok(&self.graph[idx])
    }

    /// Version of an installed package; `None` for dependency-only nodes
    pub fn version(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.package(name)?.version())
    }

    /// All package names, sorted
    pub fn package_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Direct neighbours in the given direction, sorted by name
    pub fn neighbors(&self, name: &str, direction: SearchDirection) -> Result<Vec<&str>> {
        let idx = self.node_index(name)?;
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction.edge_direction())
            .map(|n| self.name_of(n))
            .collect();
        names.sort_unstable();
        names.dedup();
        Ok(names)
    }

    pub fn in_degree(&self, name: &str) -> Result<usize> {
        let idx = self.node_index(name)?;
        Ok(self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .count())
    }

    /// Version spec on the edge `from -> to`, if that edge exists
    pub fn requirement(&self, from: &str, to: &str) -> Option<&VersionSpec> {
        let from_idx = *self.index.get(from)?;
        let to_idx = *self.index.get(to)?;
        self.graph
            .find_edge(from_idx, to_idx)
            .map(|edge| &self.graph[edge])
    }

    /// All edges as `(dependent, dependency)` pairs, sorted
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .map(|(a, b)| (self.name_of(a), self.name_of(b)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Every node reachable from `name` in the given direction, excluding
    /// `name` itself even when it sits on a cycle
    pub fn reachable(&self, name: &str, direction: SearchDirection) -> Result<BTreeSet<&str>> {
        let start = self.node_index(name)?;
        let visited = self.bfs([start], direction, None);
        Ok(visited
            .into_iter()
            .filter(|idx| *idx != start)
            .map(|idx| self.name_of(idx))
            .collect())
    }

    /// True if a directed path leads from any source to `target`. A source
    /// equal to `target` counts as reaching it.
    pub fn is_reachable_from_any(&self, sources: &[&str], target: &str) -> Result<bool> {
        let target_idx = self.node_index(target)?;
        let starts = sources
            .iter()
            .map(|s| self.node_index(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(self
            .bfs(starts, SearchDirection::Down, None)
            .contains(&target_idx))
    }

    /// Nodes reachable downward from the named sources without passing
    /// through `blocked`. Unknown names are ignored.
    pub(crate) fn reachable_avoiding<'a>(
        &'a self,
        sources: impl IntoIterator<Item = &'a str>,
        blocked: &str,
    ) -> HashSet<&'a str> {
        let blocked_idx = self.index.get(blocked).copied();
        let starts: Vec<NodeIndex> = sources
            .into_iter()
            .filter_map(|s| self.index.get(s).copied())
            .filter(|idx| Some(*idx) != blocked_idx)
            .collect();
        self.bfs(starts, SearchDirection::Down, blocked_idx)
            .into_iter()
            .map(|idx| self.name_of(idx))
            .collect()
    }

    fn bfs(
        &self,
        starts: impl IntoIterator<Item = NodeIndex>,
        direction: SearchDirection,
        blocked: Option<NodeIndex>,
    ) -> HashSet<NodeIndex> {
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        for start in starts {
            if visited.insert(start) {
                queue.push_back(start);
            }
        }

        while let Some(current) = queue.pop_front() {
            for next in self
                .graph
                .neighbors_directed(current, direction.edge_direction())
            {
                if Some(next) != blocked && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Names of every node in a non-trivial strongly connected component or
    /// carrying a self-loop, i.e. every node on some simple cycle
    pub fn cycle_members(&self) -> BTreeSet<&str> {
        petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|idx| self.graph.find_edge(*idx, *idx).is_some())
            })
            .flatten()
            .map(|idx| self.name_of(idx))
            .collect()
    }

    /// Removes a node and all of its edges
    pub fn remove_package(&mut self, name: &str) -> Result<()> {
        let idx = self.node_index(name)?;
        self.graph.remove_node(idx);
        self.index.remove(name);
        Ok(())
    }
}
