/// Mock implementations for testing
mod mock_environment_resolver;
mod mock_package_cache_reader;
mod mock_prefix_file_lister;
mod mock_progress_reporter;

pub use mock_environment_resolver::MockEnvironmentResolver;
pub use mock_package_cache_reader::MockPackageCacheReader;
pub use mock_prefix_file_lister::MockPrefixFileLister;
pub use mock_progress_reporter::MockProgressReporter;
