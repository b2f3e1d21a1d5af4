use std::collections::HashSet;

use regex::Regex;

use crate::config::Config;
use crate::error::{Result, TreeLintError};
use crate::syntax::SourceFile;

/// Decides which files are test sources and which rules apply to them.
///
/// Computed once from the `[test-pattern]` config table:
/// - `patterns`: path regexes marking a file as a test source
/// - `exclude-rule-sets`: rule-set ids wholly excluded from test analysis
/// - `exclude-rules`: individual rule ids excluded within the remaining sets
///
/// The two exclusion levels apply in that order: whole sets are dropped
/// first, then individual rules among the remainder.
#[derive(Debug, Default)]
pub struct TestPattern {
    patterns: Vec<Regex>,
    excluded_rule_sets: HashSet<String>,
    excluding_rules: HashSet<String>,
}

impl TestPattern {
    /// Builds the classifier from the `[test-pattern]` scope of `config`.
    ///
    /// # Errors
    /// Returns an error if any path pattern is not a valid regex.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sub = config.sub_config("test-pattern");

        let patterns = sub
            .value_or_default("patterns", Vec::new())
            .into_iter()
            .map(|pattern| {
                Regex::new(&pattern).map_err(|e| TreeLintError::InvalidPattern {
                    pattern,
                    source: e,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let excluded_rule_sets = sub
            .value_or_default("exclude-rule-sets", Vec::new())
            .into_iter()
            .collect();
        let excluding_rules = sub
            .value_or_default("exclude-rules", Vec::new())
            .into_iter()
            .collect();

        Ok(Self {
            patterns,
            excluded_rule_sets,
            excluding_rules,
        })
    }

    /// True iff any path pattern matches the file's absolute path.
    #[must_use]
    pub fn is_test_source(&self, file: &SourceFile) -> bool {
        let path = file.absolute_path().to_string_lossy();
        self.patterns.iter().any(|p| p.is_match(&path))
    }

    /// True iff the rule-set id is wholly excluded from test analysis.
    #[must_use]
    pub fn matches_rule_set(&self, id: &str) -> bool {
        self.excluded_rule_sets.contains(id)
    }

    /// True iff the individual rule id is excluded from test analysis.
    #[must_use]
    pub fn matches_rule(&self, id: &str) -> bool {
        self.excluding_rules.contains(id)
    }
}

#[cfg(test)]
#[path = "test_pattern_tests.rs"]
mod tests;
