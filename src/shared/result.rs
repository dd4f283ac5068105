/// Crate-wide Result, carrying an `anyhow::Error` so domain errors
/// (`CondaTreeError`) and I/O context can travel through the same `?` chain.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
