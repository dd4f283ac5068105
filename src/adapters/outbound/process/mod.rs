/// Adapters that shell out to the conda executable
mod conda_info_resolver;

pub use conda_info_resolver::{CondaInfoResolver, CONDA_EXE_VAR};
