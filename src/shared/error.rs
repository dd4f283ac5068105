use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The command ran to completion
    Success = 0,
    /// Unknown package, invalid arguments, or any application error
    Failure = 1,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Failure => write!(f, "Failure (1)"),
        }
    }
}

/// Application-specific errors for inspecting a conda environment.
#[derive(Debug, Error)]
pub enum CondaTreeError {
    /// The requested package is not a node of the dependency graph
    #[error("package \"{package}\" not found")]
    NotFound { package: String },

    #[error("Failed to resolve conda environment: {reason}\n\n💡 Hint: Pass the environment location explicitly with --prefix")]
    EnvironmentResolutionFailed { reason: String },

    /// Raised by operations that require an acyclic graph
    #[error("The dependency graph is cyclical ({cycle_count} cycle(s) found), {operation} is not supported\n\n💡 Hint: Run the 'cycles' subcommand to list them, or unset 'strict_acyclic'")]
    CyclicGraphUnsupported {
        operation: String,
        cycle_count: usize,
    },

    #[error("Failed to parse package record: {path}\nDetails: {details}")]
    RecordParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid environment prefix: {path}\nReason: {reason}\n\n💡 Hint: A conda prefix contains a 'conda-meta' directory")]
    InvalidPrefix { path: PathBuf, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CondaTreeError {
    pub fn not_found(package: impl Into<String>) -> Self {
        CondaTreeError::NotFound {
            package: package.into(),
        }
    }
}
