use std::path::{Path, PathBuf};

use serde::Serialize;

/// Closed set of node kinds a parsed syntax tree can contain.
///
/// The parser collaborator maps its grammar onto these kinds; rules dispatch
/// on them without knowing anything about the source grammar itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Class,
    Function,
    Property,
    Call,
    Import,
    Annotation,
    Comment,
    Block,
    Other,
}

/// Source position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Line/column range covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Single-point span at the given position.
    #[must_use]
    pub const fn point(line: usize, column: usize) -> Self {
        let loc = Location::new(line, column);
        Self::new(loc, loc)
    }

    /// Number of source lines covered, inclusive.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

/// One node of a parsed syntax tree.
///
/// Produced by the parser collaborator; treelint only walks it and reads
/// kind, name, text and span.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub text: String,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            text: String::new(),
            span: Span::point(1, 1),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// Visits this node and all descendants in preorder.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SyntaxNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A parsed source file handed to the engine.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    root: SyntaxNode,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, root: SyntaxNode) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            root,
        }
    }

    #[must_use]
    pub fn absolute_path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn root(&self) -> &SyntaxNode {
        &self.root
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
