/// Use cases module containing application business logic orchestration
mod inspect_environment;
mod resolve_prefix;

pub use inspect_environment::{InspectEnvironmentUseCase, CONDA_INTERNAL_DIRS};
pub use resolve_prefix::ResolvePrefixUseCase;
