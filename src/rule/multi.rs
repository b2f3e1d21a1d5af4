use crate::syntax::SourceFile;

use super::{Issue, Rule, RuleContext};

/// Ordered aggregate of child rules sharing one reporting sink.
///
/// Visiting a `MultiRule` dispatches, in declared order, to every child;
/// its finding list is the concatenation of the children's findings in
/// child-declaration order. Activation of the children is internal to the
/// aggregate: the per-rule-id configuration path gates the `MultiRule`
/// itself, not its parts.
pub struct MultiRule {
    issue: Issue,
    children: Vec<Box<dyn Rule>>,
}

impl MultiRule {
    #[must_use]
    pub fn new(issue: Issue, children: Vec<Box<dyn Rule>>) -> Self {
        Self { issue, children }
    }

    #[must_use]
    pub fn children(&self) -> &[Box<dyn Rule>] {
        &self.children
    }
}

impl Rule for MultiRule {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        for child in &self.children {
            child.visit(file, ctx);
        }
    }
}

#[cfg(test)]
#[path = "multi_tests.rs"]
mod tests;
