/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (conda, file system, console).
pub mod environment_resolver;
pub mod output_presenter;
pub mod package_cache_reader;
pub mod prefix_file_lister;
pub mod progress_reporter;

pub use environment_resolver::{CondaInfo, EnvironmentResolver};
pub use output_presenter::OutputPresenter;
pub use package_cache_reader::PackageCacheReader;
pub use prefix_file_lister::PrefixFileLister;
pub use progress_reporter::ProgressReporter;
