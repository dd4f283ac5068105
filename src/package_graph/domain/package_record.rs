use crate::shared::Result;
use std::collections::BTreeMap;
use std::fmt;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Installed packages keyed by name, ordered so every run walks them identically
pub type PackageRecords = BTreeMap<String, PackageRecord>;

/// One installed package as described by the package manager's metadata cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    name: String,
    version: String,
    depends: Vec<String>,
    files: Vec<String>,
}

impl PackageRecord {
    pub fn new(
        name: String,
        version: String,
        depends: Vec<String>,
        files: Vec<String>,
    ) -> Result<Self> {
        validate_package_name(&name)?;

        Ok(Self {
            name,
            version,
            depends,
            files,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Paths owned by this package, relative to the environment prefix
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Parsed dependency constraints; blank entries are skipped
    pub fn constraints(&self) -> impl Iterator<Item = DependencyConstraint> + '_ {
        self.depends
            .iter()
            .filter_map(|raw| DependencyConstraint::parse(raw))
    }
}

fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Package name cannot be empty");
    }

    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        anyhow::bail!(
            "Package name is too long ({} bytes). Maximum allowed: {} bytes",
            name.len(),
            MAX_PACKAGE_NAME_LENGTH
        );
    }

    if name.chars().any(char::is_whitespace) {
        anyhow::bail!("Package name '{}' must not contain whitespace", name);
    }

    Ok(())
}

/// Version restriction attached to a dependency edge.
///
/// Holds the whitespace-separated tokens following the target name, e.g.
/// `numpy 1.18.* py37*` yields `["1.18.*", "py37*"]`. An empty spec means
/// any version satisfies the dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSpec(Vec<String>);

impl VersionSpec {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "any")
        } else {
            write!(f, "{}", self.0.join(", "))
        }
    }
}

/// A dependency constraint string split into its target and version spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyConstraint {
    target: String,
    spec: VersionSpec,
}

impl DependencyConstraint {
    /// Splits `name [tokens...]`; returns `None` for a blank string
    pub fn parse(raw: &str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let target = tokens.next()?.to_string();
        let spec = VersionSpec::new(tokens.map(str::to_string).collect());
        Some(Self { target, spec })
    }

    pub fn into_parts(self) -> (String, VersionSpec) {
        (self.target, self.spec)
    }
}
