mod complexity;
mod naming;
mod style;

pub use complexity::{ComplexityProvider, LongMethod, TooManyFunctions};
pub use naming::{FunctionNaming, NamingProvider, PropertyNaming, naming_rules};
pub use style::{
    FileParsingRule, ForbiddenComment, MaxLineLength, StyleProvider, TrailingWhitespace,
};

use crate::ruleset::RuleSetProvider;

/// The built-in providers, one per rule set.
#[must_use]
pub fn default_providers() -> Vec<Box<dyn RuleSetProvider>> {
    vec![
        Box::new(StyleProvider),
        Box::new(NamingProvider),
        Box::new(ComplexityProvider),
    ]
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
