use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::rule::Rule;
use crate::syntax::SourceFile;

use super::{RuleSetProvider, TestPattern, resolve_rule_sets};

/// Builds and owns both rule lists and the rule-id → rule-set-id lookup.
///
/// Everything is computed once at construction from an immutable config
/// snapshot and shared read-only across all concurrent file analyses.
pub struct RuleManager {
    normal_rules: Vec<Arc<dyn Rule>>,
    test_rules: Vec<Arc<dyn Rule>>,
    rule_set_lookup: HashMap<String, String>,
    test_pattern: TestPattern,
}

impl RuleManager {
    #[must_use]
    pub fn new(
        providers: &[Box<dyn RuleSetProvider>],
        config: &Config,
        test_pattern: TestPattern,
    ) -> Self {
        let rule_sets = resolve_rule_sets(providers, config);

        let normal_rules = rule_sets
            .iter()
            .flat_map(|rule_set| {
                let rule_set_config = config.sub_config(rule_set.id());
                rule_set
                    .rules()
                    .iter()
                    .filter(move |rule| is_active(&rule_set_config, rule.id()))
                    .cloned()
            })
            .collect();

        // Whole-set exclusion applies before per-rule exclusion.
        let test_rules = rule_sets
            .iter()
            .filter(|rule_set| !test_pattern.matches_rule_set(rule_set.id()))
            .flat_map(|rule_set| {
                let rule_set_config = config.sub_config(rule_set.id());
                rule_set
                    .rules()
                    .iter()
                    .filter(|rule| !test_pattern.matches_rule(rule.id()))
                    .filter(move |rule| is_active(&rule_set_config, rule.id()))
                    .cloned()
            })
            .collect();

        // The lookup covers the full rule-set universe, not just active
        // rules, so reporting can resolve any declared rule.
        let mut rule_set_lookup = HashMap::new();
        for rule_set in &rule_sets {
            for rule in rule_set.rules() {
                rule_set_lookup.insert(rule.id().to_owned(), rule_set.id().to_owned());
            }
        }

        Self {
            normal_rules,
            test_rules,
            rule_set_lookup,
            test_pattern,
        }
    }

    /// The rule list applying to `file`: the test list for test sources,
    /// the normal list otherwise.
    #[must_use]
    pub fn applicable_rules(&self, file: &SourceFile) -> &[Arc<dyn Rule>] {
        if self.test_pattern.is_test_source(file) {
            &self.test_rules
        } else {
            &self.normal_rules
        }
    }

    /// Resolves a rule id to its owning rule-set id.
    ///
    /// # Panics
    /// Panics if `id` was never declared by any provider. A miss is a
    /// construction-time contract violation, not a data-dependent case.
    #[must_use]
    pub fn rule_set_for_rule_id(&self, id: &str) -> &str {
        self.rule_set_lookup
            .get(id)
            .unwrap_or_else(|| panic!("No rule '{id}' found in defined rule sets"))
    }
}

fn is_active(rule_set_config: &Config, rule_id: &str) -> bool {
    rule_set_config
        .sub_config(rule_id)
        .value_or_default("active", false)
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
