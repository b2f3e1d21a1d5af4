use std::sync::Arc;

use crate::config::Config;
use crate::rule::{Debt, Entity, Excludes, Finding, Issue, Rule, RuleContext, Severity, SubRule};
use crate::ruleset::{RuleSet, RuleSetProvider};
use crate::syntax::{Location, SourceFile, SyntaxNode};

pub struct StyleProvider;

impl RuleSetProvider for StyleProvider {
    fn build_rule_set(&self, config: &Config) -> Option<RuleSet> {
        let set_config = config.sub_config("style");
        Some(RuleSet::new(
            "style",
            vec![
                Arc::new(FileParsingRule::new(&set_config)),
                Arc::new(ForbiddenComment::new(
                    &set_config.sub_config("ForbiddenComment"),
                )),
            ],
        ))
    }
}

/// Line-oriented checks bundled into one pass over the raw file text.
///
/// The line sequence is derived once and fanned out to each sub-rule, so
/// text-oriented checks never re-derive the view. Sub-rules read their
/// options from the rule-set scope but are activated with this rule.
pub struct FileParsingRule {
    issue: Issue,
    sub_rules: Vec<Box<dyn SubRule<[String]>>>,
}

impl FileParsingRule {
    #[must_use]
    pub fn new(rule_set_config: &Config) -> Self {
        Self {
            issue: Issue::new(
                "FileParsingRule",
                Severity::Style,
                "Line-based checks over the raw file text.",
                Debt::FIVE_MINS,
            ),
            sub_rules: vec![
                Box::new(MaxLineLength::new(&rule_set_config.sub_config("MaxLineLength"))),
                Box::new(TrailingWhitespace::new(
                    &rule_set_config.sub_config("TrailingWhitespace"),
                )),
            ],
        }
    }
}

impl Rule for FileParsingRule {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        let lines: Vec<String> = file.text().lines().map(ToOwned::to_owned).collect();
        for sub_rule in &self.sub_rules {
            sub_rule.apply(&lines, file, ctx);
        }
    }
}

/// Flags lines longer than the configured maximum.
pub struct MaxLineLength {
    issue: Issue,
    max_line_length: usize,
    exclude_import_statements: bool,
}

impl MaxLineLength {
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            issue: Issue::new(
                "MaxLineLength",
                Severity::Style,
                "Line detected that is longer than the defined maximum line length.",
                Debt::FIVE_MINS,
            ),
            max_line_length: config
                .value_or_default("maxLineLength", Self::DEFAULT_MAX_LINE_LENGTH),
            exclude_import_statements: config.value_or_default("excludeImportStatements", false),
        }
    }
}

impl SubRule<[String]> for MaxLineLength {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn apply(&self, lines: &[String], file: &SourceFile, ctx: &mut RuleContext) {
        for (idx, line) in lines.iter().enumerate() {
            if self.exclude_import_statements && line.trim_start().starts_with("import ") {
                continue;
            }
            let length = line.chars().count();
            if length > self.max_line_length {
                let entity = Entity::at(file, Location::new(idx + 1, self.max_line_length + 1));
                ctx.report(Finding::new(&self.issue, entity).with_message(format!(
                    "Line {} is {length} characters long, exceeding the maximum of {}.",
                    idx + 1,
                    self.max_line_length
                )));
            }
        }
    }
}

/// Flags lines ending in spaces or tabs.
pub struct TrailingWhitespace {
    issue: Issue,
}

impl TrailingWhitespace {
    #[must_use]
    pub fn new(_config: &Config) -> Self {
        Self {
            issue: Issue::new(
                "TrailingWhitespace",
                Severity::Style,
                "Whitespace detected at the end of a line.",
                Debt::FIVE_MINS,
            ),
        }
    }
}

impl SubRule<[String]> for TrailingWhitespace {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn apply(&self, lines: &[String], file: &SourceFile, ctx: &mut RuleContext) {
        for (idx, line) in lines.iter().enumerate() {
            if line.ends_with(' ') || line.ends_with('\t') {
                let column = line.trim_end().chars().count() + 1;
                let entity = Entity::at(file, Location::new(idx + 1, column));
                ctx.report(Finding::new(&self.issue, entity));
            }
        }
    }
}

/// Flags comments containing forbidden markers (e.g. `TODO:`).
///
/// Comment text matching the `excludes` patterns is exempt from reporting.
pub struct ForbiddenComment {
    issue: Issue,
    values: Vec<String>,
    excludes: Excludes,
}

impl ForbiddenComment {
    pub const DEFAULT_VALUES: &'static str = "TODO:,FIXME:,STOPSHIP:";

    #[must_use]
    pub fn new(config: &Config) -> Self {
        let values = config
            .value_or_default("values", Self::DEFAULT_VALUES.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self {
            issue: Issue::new(
                "ForbiddenComment",
                Severity::Style,
                "Flags a forbidden comment marker.",
                Debt::TEN_MINS,
            ),
            values,
            excludes: Excludes::new(&config.value_or_default("excludes", String::new())),
        }
    }
}

impl Rule for ForbiddenComment {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_comment(&self, node: &SyntaxNode, file: &SourceFile, ctx: &mut RuleContext) {
        let text = &node.text;
        let forbidden = self.values.iter().find(|value| text.contains(value.as_str()));
        if let Some(value) = forbidden
            && self.excludes.none(text)
        {
            ctx.report(
                Finding::new(&self.issue, Entity::from_node(file, node))
                    .with_message(format!("The comment contains '{value}'.")),
            );
        }
    }
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
