use crate::package_graph::domain::{DependencyGraph, SearchDirection};
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fmt::Write;

/// DotExporter - Graphviz `dot` rendering of the dependency graph
///
/// Edges always point from dependent to dependency, whichever direction
/// selected the nodes.
pub struct DotExporter;

impl DotExporter {
    /// Every edge of the graph
    pub fn export(graph: &DependencyGraph) -> String {
        Self::write_digraph(graph.edges())
    }

    /// Edges among `package` and everything it reaches in `direction`
    pub fn export_from(
        graph: &DependencyGraph,
        package: &str,
        direction: SearchDirection,
    ) -> Result<String> {
        let mut members: BTreeSet<&str> = graph.reachable(package, direction)?;
        members.insert(package);

        let edges = graph
            .edges()
            .into_iter()
            .filter(|(from, to)| members.contains(from) && members.contains(to))
            .collect();
        Ok(Self::write_digraph(edges))
    }

    fn write_digraph(edges: Vec<(&str, &str)>) -> String {
        let mut out = String::from("digraph {\n");
        for (from, to) in edges {
            let _ = writeln!(out, "  \"{}\" -> \"{}\";", escape(from), escape(to));
        }
        out.push_str("}\n");
        out
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
