mod loader;

pub use loader::{from_toml_str, load_config};

use std::sync::Arc;

use toml::{Table, Value};

/// Hierarchical, default-falling-back settings store.
///
/// A `Config` is a read-only view over an immutable TOML table. Rule-set and
/// rule scopes are nested tables; absent keys are the normal case (every rule
/// ships inactive by default), so lookups never fail.
#[derive(Debug, Clone, Default)]
pub struct Config {
    table: Arc<Table>,
}

impl Config {
    /// An empty configuration; every lookup falls back to its default.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_table(table: Table) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Returns the nested scope under `key`.
    ///
    /// An absent key (or a non-table value) yields an empty scope that falls
    /// back to defaults on every lookup.
    #[must_use]
    pub fn sub_config(&self, key: &str) -> Self {
        match self.table.get(key) {
            Some(Value::Table(table)) => Self::from_table(table.clone()),
            _ => Self::empty(),
        }
    }

    /// Returns the configured value for `key` if present and type-compatible,
    /// else `default`.
    pub fn value_or_default<T: ConfigValue>(&self, key: &str, default: T) -> T {
        self.table
            .get(key)
            .and_then(T::from_value)
            .unwrap_or(default)
    }
}

/// Conversion from a raw config value into a typed option.
///
/// A `None` means the value is type-incompatible and the caller's default
/// applies.
pub trait ConfigValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl ConfigValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ConfigValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl ConfigValue for usize {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer().and_then(|n| Self::try_from(n).ok())
    }
}

impl ConfigValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        #[allow(clippy::cast_precision_loss)]
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as Self),
            _ => None,
        }
    }
}

impl ConfigValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }
}

impl ConfigValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(ToOwned::to_owned))
                .collect()
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
