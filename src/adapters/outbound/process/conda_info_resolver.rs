use crate::ports::outbound::{CondaInfo, EnvironmentResolver};
use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use std::ffi::OsString;
use std::process::Command;

/// Environment variable conda sets to its own executable on activation
pub const CONDA_EXE_VAR: &str = "CONDA_EXE";

/// CondaInfoResolver adapter running `conda info --envs --json`
///
/// The executable comes from `$CONDA_EXE`, falling back to `conda` on the
/// search path.
pub struct CondaInfoResolver {
    executable: OsString,
}

impl CondaInfoResolver {
    pub fn new(executable: impl Into<OsString>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var_os(CONDA_EXE_VAR).unwrap_or_else(|| OsString::from("conda")))
    }

    fn failure(reason: impl Into<String>) -> anyhow::Error {
        CondaTreeError::EnvironmentResolutionFailed {
            reason: reason.into(),
        }
        .into()
    }
}

impl EnvironmentResolver for CondaInfoResolver {
    fn conda_info(&self) -> Result<CondaInfo> {
        tracing::debug!(executable = ?self.executable, "querying conda info");

        let output = Command::new(&self.executable)
            .args(["info", "--envs", "--json"])
            .output()
            .map_err(|e| {
                Self::failure(format!(
                    "could not run {}: {}",
                    self.executable.to_string_lossy(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(Self::failure(format!(
                "{} info exited with {}: {}",
                self.executable.to_string_lossy(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_conda_info(&output.stdout)
    }
}

fn parse_conda_info(stdout: &[u8]) -> Result<CondaInfo> {
    serde_json::from_slice(stdout).map_err(|e| {
        CondaInfoResolver::failure(format!("unexpected conda info output: {}", e))
    })
}
