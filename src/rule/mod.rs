mod excludes;
mod multi;
mod sub;

pub use excludes::Excludes;
pub use multi::MultiRule;
pub use sub::SubRule;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::syntax::{Location, NodeKind, SourceFile, SyntaxNode};

/// How severe a reported violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    CodeSmell,
    Style,
    Warning,
    Defect,
    Minor,
    Maintainability,
    Security,
    Performance,
}

/// Estimated time to fix one violation of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Debt {
    pub mins: u32,
}

impl Debt {
    pub const FIVE_MINS: Self = Self { mins: 5 };
    pub const TEN_MINS: Self = Self { mins: 10 };
    pub const TWENTY_MINS: Self = Self { mins: 20 };
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.mins)
    }
}

/// A rule's static identity: id, severity, description and remediation cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub description: String,
    pub debt: Debt,
}

impl Issue {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        debt: Debt,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            description: description.into(),
            debt,
        }
    }
}

/// Where a finding occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub path: PathBuf,
    pub location: Location,
}

impl Entity {
    #[must_use]
    pub fn from_node(file: &SourceFile, node: &SyntaxNode) -> Self {
        Self {
            path: file.absolute_path().to_path_buf(),
            location: node.span.start,
        }
    }

    #[must_use]
    pub fn from_file(file: &SourceFile) -> Self {
        Self::at(file, Location::new(1, 1))
    }

    #[must_use]
    pub fn at(file: &SourceFile, location: Location) -> Self {
        Self {
            path: file.absolute_path().to_path_buf(),
            location,
        }
    }
}

/// One reported rule violation.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub issue: Issue,
    pub entity: Entity,
    pub message: String,
}

impl Finding {
    /// A finding whose message is the issue description.
    #[must_use]
    pub fn new(issue: &Issue, entity: Entity) -> Self {
        Self {
            issue: issue.clone(),
            entity,
            message: issue.description.clone(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Finding accumulator for one rule over one file.
///
/// A fresh context is created per rule per file and read back after the
/// visit, so findings can never leak between files.
#[derive(Debug, Default)]
pub struct RuleContext {
    findings: Vec<Finding>,
}

impl RuleContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// Unit of analysis: visits a syntax tree and reports findings.
///
/// The default `visit` walks the tree in preorder and dispatches each node to
/// the matching per-kind hook. Rules that need whole-file context (derived
/// views, cross-node state) override `visit` itself.
pub trait Rule: Send + Sync {
    fn issue(&self) -> &Issue;

    fn id(&self) -> &str {
        &self.issue().id
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        self.visit_file(file, ctx);
        file.root().walk(&mut |node| match node.kind {
            NodeKind::Class => self.visit_class(node, file, ctx),
            NodeKind::Function => self.visit_function(node, file, ctx),
            NodeKind::Property => self.visit_property(node, file, ctx),
            NodeKind::Call => self.visit_call(node, file, ctx),
            NodeKind::Import => self.visit_import(node, file, ctx),
            NodeKind::Annotation => self.visit_annotation(node, file, ctx),
            NodeKind::Comment => self.visit_comment(node, file, ctx),
            NodeKind::Block | NodeKind::Other => {}
        });
    }

    /// Called once per file, before any node dispatch.
    fn visit_file(&self, _file: &SourceFile, _ctx: &mut RuleContext) {}

    fn visit_class(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_function(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_property(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_call(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_import(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_annotation(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
    fn visit_comment(&self, _node: &SyntaxNode, _file: &SourceFile, _ctx: &mut RuleContext) {}
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
