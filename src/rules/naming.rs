use std::sync::Arc;

use crate::config::Config;
use crate::rule::{Debt, Entity, Finding, Issue, MultiRule, Rule, RuleContext, Severity};
use crate::ruleset::{RuleSet, RuleSetProvider};
use crate::syntax::{SourceFile, SyntaxNode};

pub struct NamingProvider;

impl RuleSetProvider for NamingProvider {
    fn build_rule_set(&self, config: &Config) -> Option<RuleSet> {
        let set_config = config.sub_config("naming");
        Some(RuleSet::new(
            "naming",
            vec![Arc::new(naming_rules(&set_config))],
        ))
    }
}

/// All naming checks bundled into one aggregate.
///
/// The children share one analysis pass and one reporting sink; they are
/// activated together through the aggregate's id, not individually.
#[must_use]
pub fn naming_rules(_rule_set_config: &Config) -> MultiRule {
    MultiRule::new(
        Issue::new(
            "NamingRules",
            Severity::Style,
            "Naming convention checks.",
            Debt::FIVE_MINS,
        ),
        vec![
            Box::new(FunctionNaming::new()),
            Box::new(PropertyNaming::new()),
        ],
    )
}

/// Function names should start with a lowercase letter.
pub struct FunctionNaming {
    issue: Issue,
}

impl FunctionNaming {
    #[must_use]
    pub fn new() -> Self {
        Self {
            issue: Issue::new(
                "FunctionNaming",
                Severity::Style,
                "Function names should start with a lowercase letter.",
                Debt::FIVE_MINS,
            ),
        }
    }
}

impl Default for FunctionNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FunctionNaming {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_function(&self, node: &SyntaxNode, file: &SourceFile, ctx: &mut RuleContext) {
        if let Some(name) = &node.name
            && name.chars().next().is_some_and(char::is_uppercase)
        {
            ctx.report(
                Finding::new(&self.issue, Entity::from_node(file, node))
                    .with_message(format!("Function '{name}' should start lowercase.")),
            );
        }
    }
}

/// Property names should start with a lowercase letter.
pub struct PropertyNaming {
    issue: Issue,
}

impl PropertyNaming {
    #[must_use]
    pub fn new() -> Self {
        Self {
            issue: Issue::new(
                "PropertyNaming",
                Severity::Style,
                "Property names should start with a lowercase letter.",
                Debt::FIVE_MINS,
            ),
        }
    }
}

impl Default for PropertyNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for PropertyNaming {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_property(&self, node: &SyntaxNode, file: &SourceFile, ctx: &mut RuleContext) {
        if let Some(name) = &node.name
            && name.chars().next().is_some_and(char::is_uppercase)
        {
            ctx.report(
                Finding::new(&self.issue, Entity::from_node(file, node))
                    .with_message(format!("Property '{name}' should start lowercase.")),
            );
        }
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
