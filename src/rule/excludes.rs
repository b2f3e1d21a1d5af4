/// Substring-based exclusion list parsed from a comma-separated string.
///
/// Used to exempt values (e.g. fully-qualified annotation names) from a
/// rule's reporting scope. A single trailing `*` per segment is stripped;
/// no further wildcard syntax is supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Excludes {
    patterns: Vec<String>,
}

impl Excludes {
    #[must_use]
    pub fn new(exclude_parameter: &str) -> Self {
        let patterns = exclude_parameter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.strip_suffix('*').unwrap_or(s).to_owned())
            .collect();
        Self { patterns }
    }

    /// True iff at least one pattern is a substring of `value`.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.patterns.iter().any(|p| value.contains(p.as_str()))
    }

    #[must_use]
    pub fn none(&self, value: &str) -> bool {
        !self.contains(value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;
