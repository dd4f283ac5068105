use crate::application::dto::PrefixSelector;
use crate::ports::outbound::{CondaInfo, EnvironmentResolver};
use crate::shared::error::CondaTreeError;
use crate::shared::Result;
use std::path::PathBuf;

/// Environment names that always mean the base installation
const BASE_ENV_NAMES: [&str; 2] = ["base", "root"];

/// ResolvePrefixUseCase - picks the environment directory to inspect
///
/// Order: explicit prefix, environment name, `$CONDA_PREFIX`, then conda's
/// active and default prefixes. conda is only consulted when the earlier
/// sources do not settle it.
pub struct ResolvePrefixUseCase<E> {
    environment_resolver: E,
}

impl<E: EnvironmentResolver> ResolvePrefixUseCase<E> {
    pub fn new(environment_resolver: E) -> Self {
        Self {
            environment_resolver,
        }
    }

    pub fn execute(&self, selector: PrefixSelector) -> Result<PathBuf> {
        if let Some(prefix) = selector.prefix {
            return Ok(prefix);
        }

        if let Some(name) = selector.name {
            let info = self.environment_resolver.conda_info()?;
            return Self::locate_by_name(&info, &name);
        }

        if let Some(prefix) = selector.conda_prefix_env {
            tracing::debug!(prefix = %prefix.display(), "using $CONDA_PREFIX");
            return Ok(prefix);
        }

        let info = self.environment_resolver.conda_info()?;
        info.active_prefix.or(info.default_prefix).ok_or_else(|| {
            CondaTreeError::EnvironmentResolutionFailed {
                reason: "conda reports neither an active nor a default prefix".to_string(),
            }
            .into()
        })
    }

    fn locate_by_name(info: &CondaInfo, name: &str) -> Result<PathBuf> {
        if BASE_ENV_NAMES.contains(&name) {
            return info.default_prefix.clone().ok_or_else(|| {
                CondaTreeError::EnvironmentResolutionFailed {
                    reason: "conda reports no default prefix".to_string(),
                }
                .into()
            });
        }

        info.envs_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| info.envs.contains(candidate) || candidate.is_dir())
            .ok_or_else(|| {
                let searched: Vec<String> = info
                    .envs_dirs
                    .iter()
                    .map(|dir| dir.display().to_string())
                    .collect();
                CondaTreeError::EnvironmentResolutionFailed {
                    reason: format!(
                        "environment '{}' not found in: {}",
                        name,
                        searched.join(", ")
                    ),
                }
                .into()
            })
    }
}
