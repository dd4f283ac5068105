use crate::application::dto::{InspectRequest, InspectResponse, ListingMode, Query, TreeFlags};
use crate::package_graph::domain::{DependencyGraph, PackageRecords, SearchDirection};
use crate::package_graph::policies::{CollapsePolicy, ExcludePatterns};
use crate::package_graph::services::{
    CycleFinder, DotExporter, FileOwnership, GraphBuilder, GraphQueries, PackagePruner,
    TreeOptions, TreeRenderer,
};
use crate::ports::outbound::{PackageCacheReader, PrefixFileLister, ProgressReporter};
use crate::shared::error::CondaTreeError;
use crate::shared::Result;

/// Top-level directories of a prefix that belong to conda itself
pub const CONDA_INTERNAL_DIRS: [&str; 3] = ["conda-meta", "pkgs", "envs"];

/// InspectEnvironmentUseCase - answers one query about an environment
///
/// This use case loads the package records of the prefix, builds and
/// optionally prunes the dependency graph, then renders the answer.
///
/// # Type Parameters
/// * `R` - PackageCacheReader implementation
/// * `L` - PrefixFileLister implementation
/// * `P` - ProgressReporter implementation
pub struct InspectEnvironmentUseCase<R, L, P> {
    package_cache_reader: R,
    prefix_file_lister: L,
    progress_reporter: P,
}

impl<R, L, P> InspectEnvironmentUseCase<R, L, P>
where
    R: PackageCacheReader,
    L: PrefixFileLister,
    P: ProgressReporter,
{
    /// Creates a new InspectEnvironmentUseCase with injected dependencies
    pub fn new(package_cache_reader: R, prefix_file_lister: L, progress_reporter: P) -> Self {
        Self {
            package_cache_reader,
            prefix_file_lister,
            progress_reporter,
        }
    }

    /// Executes the query carried by `request`
    ///
    /// # Errors
    /// - the prefix cannot be read
    /// - the query names a package absent from the graph
    /// - a tree is requested for a cyclic graph in strict mode
    pub fn execute(&self, request: InspectRequest) -> Result<InspectResponse> {
        let records = self.load_records(&request)?;

        match &request.query {
            Query::UnownedFiles => self.unowned_files(&request, &records),
            Query::WhoOwns { pattern } => Ok(Self::who_owns(&records, pattern)),
            Query::Leaves {
                with_cycles,
                export,
            } => {
                let graph = self.prepare_graph(&records, &request)?;
                Self::leaves(&graph, *with_cycles, *export)
            }
            Query::Cycles => {
                let graph = self.prepare_graph(&records, &request)?;
                let cycles = CycleFinder::simple_cycles(&graph)?;
                Ok(InspectResponse::from_lines(
                    cycles.iter().map(|cycle| CycleFinder::format_cycle(cycle)),
                ))
            }
            Query::Related {
                package,
                direction,
                mode,
                flags,
            } => {
                let graph = self.prepare_graph(&records, &request)?;
                Self::related(&graph, &request, package, *direction, *mode, *flags)
            }
            Query::DepTree { dot, flags } => {
                let graph = self.prepare_graph(&records, &request)?;
                if *dot {
                    return Ok(InspectResponse::new(DotExporter::export(&graph), false));
                }
                let roots = GraphQueries::leaves_with_cycles(&graph)?;
                let roots: Vec<&str> = roots.iter().map(String::as_str).collect();
                Self::render_tree(&graph, &request, &roots, SearchDirection::Down, *flags)
            }
        }
    }

    fn load_records(&self, request: &InspectRequest) -> Result<PackageRecords> {
        self.progress_reporter.report(&format!(
            "📖 Reading package records from: {}",
            request.prefix.display()
        ));

        let records = self.package_cache_reader.read_records(&request.prefix)?;

        self.progress_reporter
            .report_completion(&format!("✅ Loaded {} package record(s)", records.len()));
        Ok(records)
    }

    /// Builds the graph, prunes excluded packages and enforces strict mode
    fn prepare_graph(
        &self,
        records: &PackageRecords,
        request: &InspectRequest,
    ) -> Result<DependencyGraph> {
        let mut graph = GraphBuilder::build(records);
        self.apply_exclusions(&mut graph, &request.exclude_patterns)?;

        if request.strict_acyclic && request.query.renders_tree() {
            Self::ensure_acyclic(&graph)?;
        }
        Ok(graph)
    }

    /// Prunes every package matching the patterns, warning about patterns
    /// that matched nothing
    fn apply_exclusions(&self, graph: &mut DependencyGraph, patterns: &[String]) -> Result<()> {
        if patterns.is_empty() {
            return Ok(());
        }

        let patterns = ExcludePatterns::new(patterns.to_vec())?;
        let removed = PackagePruner::prune_matching(graph, &patterns)?;
        tracing::info!(removed = removed.len(), "excluded packages");

        for pattern in patterns.unmatched_patterns() {
            self.progress_reporter.report_warning(&format!(
                "Exclude pattern '{}' did not match any package.",
                pattern
            ));
        }
        Ok(())
    }

    fn ensure_acyclic(graph: &DependencyGraph) -> Result<()> {
        if graph.is_acyclic() {
            return Ok(());
        }
        Err(CondaTreeError::CyclicGraphUnsupported {
            operation: "tree rendering".to_string(),
            cycle_count: CycleFinder::simple_cycles(graph)?.len(),
        }
        .into())
    }

    fn leaves(
        graph: &DependencyGraph,
        with_cycles: bool,
        export: bool,
    ) -> Result<InspectResponse> {
        let leaves = if with_cycles {
            GraphQueries::leaves_with_cycles(graph)?
        } else {
            GraphQueries::leaves(graph)
        };

        if !export {
            return Ok(InspectResponse::from_lines(leaves));
        }

        let pinned = leaves
            .iter()
            .map(|name| {
                Ok(match graph.version(name)? {
                    Some(version) => format!("{}=={}", name, version),
                    None => name.clone(),
                })
            })
            .collect::<Result<Vec<String>>>()?;
        Ok(InspectResponse::from_lines(pinned))
    }

    fn related(
        graph: &DependencyGraph,
        request: &InspectRequest,
        package: &str,
        direction: SearchDirection,
        mode: ListingMode,
        flags: TreeFlags,
    ) -> Result<InspectResponse> {
        match mode {
            ListingMode::Direct => Ok(InspectResponse::from_lines(GraphQueries::direct(
                graph, package, direction,
            )?)),
            ListingMode::Recursive => Ok(InspectResponse::from_lines(GraphQueries::recursive(
                graph, package, direction,
            )?)),
            ListingMode::Tree => Self::render_tree(graph, request, &[package], direction, flags),
            ListingMode::Dot => Ok(InspectResponse::new(
                DotExporter::export_from(graph, package, direction)?,
                false,
            )),
        }
    }

    fn render_tree(
        graph: &DependencyGraph,
        request: &InspectRequest,
        roots: &[&str],
        direction: SearchDirection,
        flags: TreeFlags,
    ) -> Result<InspectResponse> {
        let collapse = CollapsePolicy::new(request.collapse_packages.iter().cloned());
        let renderer = TreeRenderer::new(collapse);
        let options = TreeOptions {
            direction,
            full: flags.full,
            small: flags.small,
            color: request.color,
        };

        let rendered = renderer.render(graph, roots, options)?;
        Ok(InspectResponse::new(rendered.text, rendered.redundancy_hidden))
    }

    fn unowned_files(
        &self,
        request: &InspectRequest,
        records: &PackageRecords,
    ) -> Result<InspectResponse> {
        let skip_dirs: Vec<String> = CONDA_INTERNAL_DIRS
            .iter()
            .map(|dir| dir.to_string())
            .chain(request.skip_dirs.iter().cloned())
            .collect();

        let present = self
            .prefix_file_lister
            .list_files(&request.prefix, &skip_dirs)?;
        Ok(InspectResponse::from_lines(FileOwnership::unowned(
            present, records,
        )))
    }

    fn who_owns(records: &PackageRecords, pattern: &str) -> InspectResponse {
        InspectResponse::from_lines(
            FileOwnership::owners(records, pattern)
                .into_iter()
                .map(|owner| format!("{}=={} {}", owner.package, owner.version, owner.file)),
        )
    }
}
