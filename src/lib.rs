pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod syntax;

pub use error::{Result, TreeLintError};
