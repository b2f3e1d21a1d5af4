use std::sync::Arc;

use crate::config::Config;
use crate::rule::{Debt, Entity, Finding, Issue, Rule, RuleContext, Severity};
use crate::ruleset::{RuleSet, RuleSetProvider};
use crate::syntax::{NodeKind, SourceFile, SyntaxNode};

pub struct ComplexityProvider;

impl RuleSetProvider for ComplexityProvider {
    fn build_rule_set(&self, config: &Config) -> Option<RuleSet> {
        let set_config = config.sub_config("complexity");
        Some(RuleSet::new(
            "complexity",
            vec![
                Arc::new(TooManyFunctions::new(
                    &set_config.sub_config("TooManyFunctions"),
                )),
                Arc::new(LongMethod::new(&set_config.sub_config("LongMethod"))),
            ],
        ))
    }
}

/// Flags files declaring more functions than the configured threshold.
pub struct TooManyFunctions {
    issue: Issue,
    threshold: usize,
}

impl TooManyFunctions {
    pub const DEFAULT_THRESHOLD: usize = 10;

    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            issue: Issue::new(
                "TooManyFunctions",
                Severity::Maintainability,
                "Too many functions inside one file.",
                Debt::TWENTY_MINS,
            ),
            threshold: config.value_or_default("threshold", Self::DEFAULT_THRESHOLD),
        }
    }
}

impl Rule for TooManyFunctions {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        let mut count = 0;
        file.root().walk(&mut |node| {
            if node.kind == NodeKind::Function {
                count += 1;
            }
        });
        if count > self.threshold {
            ctx.report(
                Finding::new(&self.issue, Entity::from_file(file)).with_message(format!(
                    "File declares {count} functions, threshold is {}.",
                    self.threshold
                )),
            );
        }
    }
}

/// Flags functions spanning more lines than the configured maximum.
pub struct LongMethod {
    issue: Issue,
    max_lines: usize,
}

impl LongMethod {
    pub const DEFAULT_MAX_LINES: usize = 60;

    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            issue: Issue::new(
                "LongMethod",
                Severity::Maintainability,
                "One method should have one responsibility and fit on one screen.",
                Debt::TWENTY_MINS,
            ),
            max_lines: config.value_or_default("maxLines", Self::DEFAULT_MAX_LINES),
        }
    }
}

impl Rule for LongMethod {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_function(&self, node: &SyntaxNode, file: &SourceFile, ctx: &mut RuleContext) {
        let lines = node.span.line_count();
        if lines > self.max_lines {
            let name = node.name.as_deref().unwrap_or("<anonymous>");
            ctx.report(
                Finding::new(&self.issue, Entity::from_node(file, node)).with_message(format!(
                    "Function '{name}' is {lines} lines long, maximum is {}.",
                    self.max_lines
                )),
            );
        }
    }
}

#[cfg(test)]
#[path = "complexity_tests.rs"]
mod tests;
