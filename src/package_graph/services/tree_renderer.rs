//! ASCII dependency tree rendering with redundancy suppression.
//!
//! The walk is depth-first and pre-order, one line per visited node:
//!
//! ```text
//! numpy==1.26.4
//!   ├─ libblas 3.9.0 [required: >=3.9.0,<4.0a0]
//!   │  └─ libopenblas 0.3.26 [required: >=0.3.26,<1.0a0]
//!   └─ python 3.11.8 [required: >=3.11,<3.12.0a0]
//!     └─ dependencies of python displayed above
//! ```
//!
//! By default a package's subtree is expanded only the first time the
//! package appears anywhere in the output; later appearances print their own
//! line followed by a placeholder. Full mode re-expands everything except
//! cycle members that were already visited, which keeps cycles finite.

use crate::package_graph::domain::{DependencyGraph, SearchDirection};
use crate::package_graph::policies::CollapsePolicy;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

/// Width of every indentation column after the first
const TAB_SIZE: usize = 3;

/// Indentation of the first column (children of a root)
const ROOT_INDENT: &str = "  ";

/// Typed switches for one tree render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub direction: SearchDirection,
    /// Re-expand repeated packages (only cycle members are suppressed)
    pub full: bool,
    /// Never expand packages named by the collapse policy
    pub small: bool,
    /// Dim version annotations with ANSI escapes
    pub color: bool,
}

impl TreeOptions {
    pub fn new(direction: SearchDirection) -> Self {
        Self {
            direction,
            full: false,
            small: false,
            color: false,
        }
    }
}

/// Output of a render: the text plus whether any repeat was suppressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    pub text: String,
    pub redundancy_hidden: bool,
}

/// Mutable walk state, owned by one render and passed down by `&mut`
struct RenderState<'g> {
    direction: SearchDirection,
    depth: usize,
    /// Columns whose ancestor was the last of its siblings: no `│` needed
    empty_columns: BTreeSet<usize>,
    is_last: bool,
    /// Packages whose subtree has already been expanded once
    tree_exists: HashSet<&'g str>,
    redundancy_hidden: bool,
    cyclic: BTreeSet<&'g str>,
}

impl RenderState<'_> {
    fn indent(&self, depth: usize) -> String {
        let mut indent = String::new();
        for column in 0..depth {
            if column == 0 {
                indent.push_str(ROOT_INDENT);
            } else if self.empty_columns.contains(&column) {
                indent.push_str(&" ".repeat(TAB_SIZE));
            } else {
                indent.push('│');
                indent.push_str(&" ".repeat(TAB_SIZE - 1));
            }
        }
        indent
    }

    /// A placeholder hangs one column left of where a child would go: the
    /// node's own indent, then its connector (`│` unless it was the last
    /// sibling) and a space
    fn placeholder_indent(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return ROOT_INDENT.to_string();
        }
        let connector = if is_last { ' ' } else { '│' };
        format!("{}{} ", self.indent(depth), connector)
    }
}

/// What to do after printing a node's own line
enum Expansion {
    Children,
    Placeholder,
    Nothing,
}

/// TreeRenderer - formats dependency (or dependent) trees
pub struct TreeRenderer {
    collapse: CollapsePolicy,
}

impl TreeRenderer {
    pub fn new(collapse: CollapsePolicy) -> Self {
        Self { collapse }
    }

    /// Renders one tree per root, in order, sharing suppression state so a
    /// subtree shown under an earlier root is not repeated under a later one
    pub fn render(
        &self,
        graph: &DependencyGraph,
        roots: &[&str],
        options: TreeOptions,
    ) -> Result<RenderedTree> {
        let roots = roots
            .iter()
            .map(|root| graph.package(root).map(|node| node.name()))
            .collect::<Result<Vec<&str>>>()?;

        let mut state = RenderState {
            direction: options.direction,
            depth: 0,
            empty_columns: BTreeSet::new(),
            is_last: false,
            tree_exists: HashSet::new(),
            redundancy_hidden: false,
            cyclic: if options.full {
                graph.cycle_members()
            } else {
                BTreeSet::new()
            },
        };

        let mut text = String::new();
        for root in roots {
            state.depth = 0;
            state.is_last = false;
            self.walk(graph, root, None, &options, &mut state, &mut text)?;
        }

        Ok(RenderedTree {
            text,
            redundancy_hidden: state.redundancy_hidden,
        })
    }

    fn walk<'g>(
        &self,
        graph: &'g DependencyGraph,
        package: &'g str,
        parent: Option<&str>,
        options: &TreeOptions,
        state: &mut RenderState<'g>,
        out: &mut String,
    ) -> Result<()> {
        let depth = state.depth;
        let is_last = state.is_last;

        self.write_line(graph, package, parent, options, state, out)?;

        // Children of a last sibling need no vertical bar in this column
        let closes_column = is_last && depth > 0;
        if closes_column {
            state.empty_columns.insert(depth);
        }

        match self.expansion(package, options, state) {
            Expansion::Children => {
                state.tree_exists.insert(package);
                let children = graph.neighbors(package, state.direction)?;
                let count = children.len();
                for (i, child) in children.into_iter().enumerate() {
                    state.depth = depth + 1;
                    state.is_last = i + 1 == count;
                    self.walk(graph, child, Some(package), options, state, out)?;
                }
            }
            Expansion::Placeholder => {
                let message = format!(
                    "└─ {} of {} displayed above",
                    state.direction.relation_noun(),
                    package
                );
                let _ = writeln!(
                    out,
                    "{}{}",
                    state.placeholder_indent(depth, is_last),
                    dim(&message, options)
                );
            }
            Expansion::Nothing => {}
        }

        if closes_column {
            state.empty_columns.remove(&depth);
        }
        state.depth = depth;
        state.is_last = is_last;
        Ok(())
    }

    fn expansion(
        &self,
        package: &str,
        options: &TreeOptions,
        state: &mut RenderState<'_>,
    ) -> Expansion {
        if options.small && self.collapse.collapses(package) {
            return Expansion::Nothing;
        }

        if !state.tree_exists.contains(package) {
            return Expansion::Children;
        }

        if !options.full {
            state.redundancy_hidden = true;
            Expansion::Placeholder
        } else if state.cyclic.contains(package) {
            Expansion::Placeholder
        } else {
            Expansion::Children
        }
    }

    fn write_line(
        &self,
        graph: &DependencyGraph,
        package: &str,
        parent: Option<&str>,
        options: &TreeOptions,
        state: &RenderState<'_>,
        out: &mut String,
    ) -> Result<()> {
        let version = graph.version(package)?;

        let Some(parent) = parent else {
            let _ = match version {
                Some(v) => writeln!(out, "{}=={}", package, v),
                None => writeln!(out, "{}", package),
            };
            return Ok(());
        };

        let requirement = match state.direction {
            SearchDirection::Down => graph.requirement(parent, package),
            SearchDirection::Up => graph.requirement(package, parent),
        };
        let requirement = requirement.map_or_else(|| "any".to_string(), ToString::to_string);

        let branch = if state.is_last { "└─" } else { "├─" };
        let annotation = match version {
            Some(v) => format!(" {} [required: {}]", v, requirement),
            None => format!(" [required: {}]", requirement),
        };

        let _ = writeln!(
            out,
            "{}{} {}{}",
            state.indent(state.depth),
            branch,
            package,
            dim(&annotation, options)
        );
        Ok(())
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new(CollapsePolicy::default())
    }
}

fn dim(text: &str, options: &TreeOptions) -> String {
    if options.color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_graph::domain::VersionSpec;

    fn spec(tokens: &[&str]) -> VersionSpec {
        VersionSpec::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    /// A -> {B, C}, B -> C
    fn diamond() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_package("A", "1.0");
        graph.add_package("B", "2.0");
        graph.add_package("C", "3.0");
        graph.add_dependency("A", "B", spec(&[">=2"]));
        graph.add_dependency("A", "C", VersionSpec::default());
        graph.add_dependency("B", "C", spec(&[">=3", "py_0"]));
        graph
    }

    fn render(graph: &DependencyGraph, roots: &[&str], options: TreeOptions) -> RenderedTree {
        TreeRenderer::default().render(graph, roots, options).unwrap()
    }

    #[test]
    fn test_default_mode_suppresses_second_occurrence() {
        let tree = render(&diamond(), &["A"], TreeOptions::new(SearchDirection::Down));

        let expected = "\
A==1.0
  ├─ B 2.0 [required: >=2]
  │  └─ C 3.0 [required: >=3, py_0]
  └─ C 3.0 [required: any]
    └─ dependencies of C displayed above
";
        assert_eq!(tree.text, expected);
        assert!(tree.redundancy_hidden);
    }

    #[test]
    fn test_full_mode_repeats_subtrees() {
        let mut graph = diamond();
        graph.add_package("D", "4.0");
        graph.add_dependency("C", "D", VersionSpec::default());

        let options = TreeOptions {
            full: true,
            ..TreeOptions::new(SearchDirection::Down)
        };
        let tree = render(&graph, &["A"], options);

        let expected = "\
A==1.0
  ├─ B 2.0 [required: >=2]
  │  └─ C 3.0 [required: >=3, py_0]
  │     └─ D 4.0 [required: any]
  └─ C 3.0 [required: any]
     └─ D 4.0 [required: any]
";
        assert_eq!(tree.text, expected);
        assert!(!tree.redundancy_hidden);
    }

    #[test]
    fn test_upward_walk_uses_reverse_edges() {
        let tree = render(&diamond(), &["C"], TreeOptions::new(SearchDirection::Up));

        let expected = "\
C==3.0
  ├─ A 1.0 [required: any]
  └─ B 2.0 [required: >=3, py_0]
     └─ A 1.0 [required: >=2]
       └─ dependent packages of A displayed above
";
        assert_eq!(tree.text, expected);
        assert!(tree.redundancy_hidden);
    }

    #[test]
    fn test_placeholder_hangs_under_its_connector() {
        let mut graph = DependencyGraph::new();
        for (from, to) in [("r", "a"), ("r", "b"), ("r", "c"), ("a", "b"), ("b", "x")] {
            graph.add_dependency(from, to, VersionSpec::default());
        }
        let tree = render(&graph, &["r"], TreeOptions::new(SearchDirection::Down));

        let expected = "\
r
  ├─ a [required: any]
  │  └─ b [required: any]
  │     └─ x [required: any]
  ├─ b [required: any]
  │ └─ dependencies of b displayed above
  └─ c [required: any]
";
        assert_eq!(tree.text, expected);
        assert!(tree.redundancy_hidden);
    }

    #[test]
    fn test_vertical_bars_continue_past_nested_subtrees() {
        let mut graph = DependencyGraph::new();
        for (from, to) in [("r", "a"), ("r", "b"), ("a", "a1"), ("a", "a2"), ("a1", "x")] {
            graph.add_dependency(from, to, VersionSpec::default());
        }
        let tree = render(&graph, &["r"], TreeOptions::new(SearchDirection::Down));

        let expected = "\
r
  ├─ a [required: any]
  │  ├─ a1 [required: any]
  │  │  └─ x [required: any]
  │  └─ a2 [required: any]
  └─ b [required: any]
";
        assert_eq!(tree.text, expected);
        assert!(!tree.redundancy_hidden);
    }

    #[test]
    fn test_placeholder_count_equals_repeat_visits() {
        // Shared deep dependencies reached along several paths
        let mut graph = DependencyGraph::new();
        for (from, to) in [
            ("app", "web"),
            ("app", "db"),
            ("app", "log"),
            ("web", "log"),
            ("web", "tls"),
            ("db", "tls"),
            ("db", "log"),
            ("tls", "zlib"),
            ("log", "zlib"),
        ] {
            graph.add_dependency(from, to, VersionSpec::default());
        }

        let tree = render(&graph, &["app"], TreeOptions::new(SearchDirection::Down));

        let visits = tree.text.lines().filter(|l| !l.contains("displayed above")).count();
        let placeholders = tree.text.matches("displayed above").count();
        let distinct = graph.reachable("app", SearchDirection::Down).unwrap().len() + 1;

        assert_eq!(placeholders, visits - distinct);
        assert!(placeholders > 0);
    }

    #[test]
    fn test_full_mode_terminates_on_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b", VersionSpec::default());
        graph.add_dependency("b", "a", VersionSpec::default());
        graph.add_dependency("b", "c", VersionSpec::default());

        let options = TreeOptions {
            full: true,
            ..TreeOptions::new(SearchDirection::Down)
        };
        let tree = render(&graph, &["a"], options);

        let expected = "\
a
  └─ b [required: any]
     ├─ a [required: any]
     │ └─ dependencies of a displayed above
     └─ c [required: any]
";
        assert_eq!(tree.text, expected);
        assert!(!tree.redundancy_hidden);
    }

    #[test]
    fn test_default_mode_self_loop() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "a", VersionSpec::default());

        let tree = render(&graph, &["a"], TreeOptions::new(SearchDirection::Down));

        let expected = "\
a
  └─ a [required: any]
    └─ dependencies of a displayed above
";
        assert_eq!(tree.text, expected);
    }

    #[test]
    fn test_small_mode_collapses_without_placeholder() {
        let mut graph = DependencyGraph::new();
        graph.add_package("app", "1");
        graph.add_package("python", "3.11.8");
        graph.add_dependency("app", "python", spec(&[">=3.11"]));
        graph.add_dependency("app", "lib", VersionSpec::default());
        graph.add_dependency("lib", "python", VersionSpec::default());
        graph.add_dependency("python", "openssl", VersionSpec::default());

        let options = TreeOptions {
            small: true,
            ..TreeOptions::new(SearchDirection::Down)
        };
        let tree = render(&graph, &["app"], options);

        let expected = "\
app==1
  ├─ lib [required: any]
  │  └─ python 3.11.8 [required: any]
  └─ python 3.11.8 [required: >=3.11]
";
        assert_eq!(tree.text, expected);
        assert!(!tree.redundancy_hidden);
    }

    #[test]
    fn test_custom_collapse_policy() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("app", "r-base", VersionSpec::default());
        graph.add_dependency("r-base", "libcurl", VersionSpec::default());

        let renderer = TreeRenderer::new(CollapsePolicy::new(["r-base"]));
        let options = TreeOptions {
            small: true,
            ..TreeOptions::new(SearchDirection::Down)
        };
        let tree = renderer.render(&graph, &["app"], options).unwrap();

        assert!(!tree.text.contains("libcurl"));
    }

    #[test]
    fn test_multiple_roots_share_suppression_state() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("x", "shared", VersionSpec::default());
        graph.add_dependency("y", "shared", VersionSpec::default());
        graph.add_dependency("shared", "base", VersionSpec::default());

        let tree = render(&graph, &["x", "y"], TreeOptions::new(SearchDirection::Down));

        let expected = "\
x
  └─ shared [required: any]
     └─ base [required: any]
y
  └─ shared [required: any]
    └─ dependencies of shared displayed above
";
        assert_eq!(tree.text, expected);
    }

    #[test]
    fn test_color_dims_annotation() {
        let options = TreeOptions {
            color: true,
            ..TreeOptions::new(SearchDirection::Down)
        };
        let tree = render(&diamond(), &["A"], options);

        assert!(tree.text.contains("\u{1b}[2m 2.0 [required: >=2]\u{1b}[0m"));
        assert!(tree.text.starts_with("A==1.0\n"));
    }

    #[test]
    fn test_unknown_root_is_error() {
        let result = TreeRenderer::default().render(
            &diamond(),
            &["missing"],
            TreeOptions::new(SearchDirection::Down),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_root_without_children() {
        let tree = render(&diamond(), &["C"], TreeOptions::new(SearchDirection::Down));
        assert_eq!(tree.text, "C==3.0\n");
        assert!(!tree.redundancy_hidden);
    }
}
