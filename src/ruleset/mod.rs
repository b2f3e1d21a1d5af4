mod manager;
mod test_pattern;

pub use manager::RuleManager;
pub use test_pattern::TestPattern;

use std::sync::Arc;

use crate::config::Config;
use crate::rule::Rule;

/// Named, ordered group of rules produced by one provider.
pub struct RuleSet {
    id: String,
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    #[must_use]
    pub fn new(id: impl Into<String>, rules: Vec<Arc<dyn Rule>>) -> Self {
        Self {
            id: id.into(),
            rules,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }
}

/// Factory building a rule set from a configuration overlay.
pub trait RuleSetProvider: Send + Sync {
    /// Builds the provider's rule set, or declines (e.g. a disabled set).
    fn build_rule_set(&self, config: &Config) -> Option<RuleSet>;
}

/// Resolves all providers into a deduplicated, id-sorted rule-set list.
///
/// Declined providers are dropped. Duplicate ids resolve deterministically:
/// after the stable sort by id, the first occurrence survives, so the
/// survivor's rules come entirely from one provider.
#[must_use]
pub fn resolve_rule_sets(providers: &[Box<dyn RuleSetProvider>], config: &Config) -> Vec<RuleSet> {
    let mut rule_sets: Vec<RuleSet> = providers
        .iter()
        .filter_map(|provider| provider.build_rule_set(config))
        .collect();
    rule_sets.sort_by(|a, b| a.id.cmp(&b.id));
    rule_sets.dedup_by(|next, kept| kept.id == next.id);
    rule_sets
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
