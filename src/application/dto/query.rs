use crate::package_graph::domain::SearchDirection;

/// How the neighbourhood of a single package is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingMode {
    /// Direct dependencies or dependents, one per line
    #[default]
    Direct,
    /// The full descendant or ancestor set, one per line
    Recursive,
    /// ASCII tree rooted at the package
    Tree,
    /// Graphviz subgraph
    Dot,
}

impl ListingMode {
    pub fn renders_tree(self) -> bool {
        self == ListingMode::Tree
    }
}

/// Tree rendering switches shared by `depends`, `whoneeds` and `deptree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeFlags {
    /// Do not expand the packages of the collapse list
    pub small: bool,
    /// Disable redundancy suppression outside cycles
    pub full: bool,
}

/// The question asked about an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Leaves {
        with_cycles: bool,
        /// Print `name==version` instead of bare names
        export: bool,
    },
    Cycles,
    /// `depends` (down) or `whoneeds` (up)
    Related {
        package: String,
        direction: SearchDirection,
        mode: ListingMode,
        flags: TreeFlags,
    },
    DepTree {
        dot: bool,
        flags: TreeFlags,
    },
    UnownedFiles,
    WhoOwns {
        pattern: String,
    },
}

impl Query {
    /// Whether the answer is an ASCII tree
    pub fn renders_tree(&self) -> bool {
        match self {
            Query::Related { mode, .. } => mode.renders_tree(),
            Query::DepTree { dot, .. } => !dot,
            _ => false,
        }
    }
}
