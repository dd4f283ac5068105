use clap::{Parser, Subcommand};
use std::path::PathBuf;

use conda_tree::application::dto::{ListingMode, Query, TreeFlags};
use conda_tree::package_graph::domain::SearchDirection;

/// Query the dependency graph of a conda environment
#[derive(Parser, Debug)]
#[command(name = "conda-tree")]
#[command(version)]
#[command(about = "Query the dependency graph of a conda environment", long_about = None)]
pub struct Args {
    /// Full path to the environment (defaults to the active one)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub prefix: Option<PathBuf>,

    /// Name of the environment, resolved through `conda info`
    #[arg(short, long, global = true, value_name = "ENV", conflicts_with = "prefix")]
    pub name: Option<String>,

    /// Prune packages matching patterns, and everything only they need
    /// (supports wildcards: *). Can be specified multiple times:
    /// -e "jupyter*" -e "pytest"
    #[arg(short, long = "exclude", value_name = "PATTERN", global = true)]
    pub exclude: Vec<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to ./conda-tree.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never emit ANSI styling
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show packages that nothing else depends on
    Leaves {
        /// Also show one package per dependency cycle unreachable from the leaves
        #[arg(long)]
        with_cycles: bool,
        /// Print name==version, suitable for a requirements file
        #[arg(long)]
        export: bool,
    },
    /// Show dependency cycles
    Cycles,
    /// Show the dependencies of a package
    Depends(PackageArgs),
    /// Show the packages that depend on a package
    Whoneeds(PackageArgs),
    /// Show the complete dependency tree of the environment
    Deptree {
        #[command(flatten)]
        tree: TreeArgs,
        /// Print the whole graph in Graphviz dot format
        #[arg(long)]
        dot: bool,
    },
    /// Show files in the environment that no package installed
    UnownedFiles,
    /// Show which packages installed files matching a path
    WhoOwns {
        /// Path or path fragment to look up
        pattern: String,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct PackageArgs {
    /// The target package
    pub package: String,
    #[command(flatten)]
    pub view: ViewArgs,
    #[command(flatten)]
    pub tree: TreeArgs,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
#[group(multiple = false)]
pub struct ViewArgs {
    /// Show the full set instead of direct neighbours
    #[arg(short, long)]
    pub recursive: bool,
    /// Show the result as a tree
    #[arg(short, long)]
    pub tree: bool,
    /// Show the result in Graphviz dot format
    #[arg(long)]
    pub dot: bool,
}

#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeArgs {
    /// Do not expand near-universal packages (python, conda by default)
    #[arg(long)]
    pub small: bool,
    /// Show repeated subtrees instead of hiding them
    #[arg(long)]
    pub full: bool,
}

impl ViewArgs {
    fn mode(&self) -> ListingMode {
        if self.recursive {
            ListingMode::Recursive
        } else if self.tree {
            ListingMode::Tree
        } else if self.dot {
            ListingMode::Dot
        } else {
            ListingMode::Direct
        }
    }
}

impl From<TreeArgs> for TreeFlags {
    fn from(args: TreeArgs) -> Self {
        TreeFlags {
            small: args.small,
            full: args.full,
        }
    }
}

impl Command {
    pub fn into_query(self) -> Query {
        match self {
            Command::Leaves {
                with_cycles,
                export,
            } => Query::Leaves {
                with_cycles,
                export,
            },
            Command::Cycles => Query::Cycles,
            Command::Depends(args) => args.into_query(SearchDirection::Down),
            Command::Whoneeds(args) => args.into_query(SearchDirection::Up),
            Command::Deptree { tree, dot } => Query::DepTree {
                dot,
                flags: tree.into(),
            },
            Command::UnownedFiles => Query::UnownedFiles,
            Command::WhoOwns { pattern } => Query::WhoOwns { pattern },
        }
    }
}

impl PackageArgs {
    fn into_query(self, direction: SearchDirection) -> Query {
        Query::Related {
            mode: self.view.mode(),
            package: self.package,
            direction,
            flags: self.tree.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("conda-tree").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_depends_tree_query() {
        let args = parse(&["depends", "numpy", "--tree", "--small"]);
        assert_eq!(
            args.command.unwrap().into_query(),
            Query::Related {
                package: "numpy".to_string(),
                direction: SearchDirection::Down,
                mode: ListingMode::Tree,
                flags: TreeFlags {
                    small: true,
                    full: false
                },
            }
        );
    }

    #[test]
    fn test_whoneeds_defaults_to_direct() {
        let args = parse(&["whoneeds", "libzlib"]);
        let query = args.command.unwrap().into_query();
        assert!(matches!(
            query,
            Query::Related {
                direction: SearchDirection::Up,
                mode: ListingMode::Direct,
                ..
            }
        ));
    }

    #[test]
    fn test_view_flags_are_exclusive() {
        let result = Args::try_parse_from(["conda-tree", "depends", "numpy", "-r", "-t"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["leaves", "--prefix", "/opt/env", "-e", "jupyter*", "--no-color"]);
        assert_eq!(args.prefix, Some(PathBuf::from("/opt/env")));
        assert_eq!(args.exclude, vec!["jupyter*"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_prefix_conflicts_with_name() {
        let result = Args::try_parse_from(["conda-tree", "-p", "/env", "-n", "work", "cycles"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_is_optional_at_parse_time() {
        let args = parse(&[]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_deptree_dot() {
        let args = parse(&["deptree", "--dot"]);
        assert_eq!(
            args.command.unwrap().into_query(),
            Query::DepTree {
                dot: true,
                flags: TreeFlags::default()
            }
        );
    }

    #[test]
    fn test_kebab_case_subcommands() {
        assert_eq!(parse(&["unowned-files"]).command, Some(Command::UnownedFiles));
        assert_eq!(
            parse(&["who-owns", "bin/python"]).command,
            Some(Command::WhoOwns {
                pattern: "bin/python".to_string()
            })
        );
    }
}
