use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// ExcludePatterns - package name patterns selecting packages to prune
///
/// `*` matches zero or more characters; everything else matches literally
/// and case-sensitively. Each pattern remembers whether it ever matched so
/// callers can warn about patterns that had no effect.
#[derive(Debug)]
pub struct ExcludePatterns {
    patterns: Vec<ExcludePattern>,
}

impl ExcludePatterns {
    /// # Errors
    /// - more than MAX_EXCLUDE_PATTERNS patterns
    /// - an empty, over-long, or wildcard-only pattern
    /// - a pattern with characters outside the allowed set
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Checks a package name against every pattern, marking those that match
    pub fn matches(&self, package_name: &str) -> bool {
        // No short-circuit: every matching pattern must be marked.
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(package_name) || hit)
    }

    /// Names from `candidates` matching at least one pattern, in input order
    pub fn select<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        candidates
            .into_iter()
            .filter(|name| self.matches(name))
            .collect()
    }

    /// Patterns that have not matched anything so far
    pub fn unmatched_patterns(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.as_str())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    /// Literal pieces between wildcards, in order
    parts: Vec<String>,
    anchored_start: bool,
    anchored_end: bool,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let parts = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            anchored_start: !pattern.starts_with('*'),
            anchored_end: !pattern.ends_with('*'),
            parts,
            original: pattern,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, name: &str) -> bool {
        let is_match = self.matches_parts(name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }

    fn matches_parts(&self, name: &str) -> bool {
        let mut rest = name;
        let last = self.parts.len().saturating_sub(1);

        for (i, part) in self.parts.iter().enumerate() {
            if i == 0 && self.anchored_start {
                match rest.strip_prefix(part.as_str()) {
                    Some(tail) => rest = tail,
                    None => return false,
                }
                if i == last && self.anchored_end {
                    return rest.is_empty();
                }
            } else if i == last && self.anchored_end {
                return rest.ends_with(part.as_str());
            } else {
                match rest.find(part.as_str()) {
                    Some(pos) => rest = &rest[pos + part.len()..],
                    None => return false,
                }
            }
        }

        !self.anchored_end || rest.is_empty()
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '*'
}
