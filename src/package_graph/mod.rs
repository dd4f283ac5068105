//! Dependency graph engine: domain model, pure services, and naming policies.
pub mod domain;
pub mod policies;
pub mod services;
