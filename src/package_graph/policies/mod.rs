mod collapse_policy;
mod exclude_patterns;

pub use collapse_policy::{CollapsePolicy, DEFAULT_COLLAPSE_PACKAGES};
pub use exclude_patterns::ExcludePatterns;
