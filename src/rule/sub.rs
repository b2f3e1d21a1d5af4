use crate::syntax::SourceFile;

use super::{Issue, RuleContext};

/// A rule operating over a derived view of a file instead of the raw tree.
///
/// The parent rule (often an aggregate) derives the view once, e.g. the
/// file's line sequence, and fans it out to each sub-rule, so the view is
/// never re-derived per check.
pub trait SubRule<V: ?Sized>: Send + Sync {
    fn issue(&self) -> &Issue;

    fn apply(&self, view: &V, file: &SourceFile, ctx: &mut RuleContext);
}
