//! Parsed options and invocations.
//!
//! [`ParsedOptions`] is what a filter sees of its command line: one value per
//! declared option, keyed by `dest`. Typed getters turn a missing or
//! mistyped option into a [`FilterError`] naming the filter.

use crate::core::error::{FilterError, FilterResult};
use crate::core::filter::{Filter, FilterMetadata};
use crate::core::types::{Value, ValueType};
use indexmap::IndexMap;

/// Option values produced by parsing a filter's command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOptions {
    /// Name of the filter the options belong to.
    filter: String,
    /// Values in option declaration order.
    values: IndexMap<String, Value>,
}

impl ParsedOptions {
    /// Create an empty option set for a filter.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            values: IndexMap::new(),
        }
    }

    /// Create an option set holding every declared option's default.
    pub fn with_defaults(metadata: &FilterMetadata) -> Self {
        let mut options = Self::new(metadata.name.clone());
        for option in &metadata.options {
            options.insert(option.dest.clone(), option.default_value.clone());
        }
        options
    }

    /// Name of the filter these options belong to.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Set an option value.
    pub fn insert(&mut self, dest: impl Into<String>, value: Value) {
        self.values.insert(dest.into(), value);
    }

    /// Get all values.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no options.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if an option was given or has a default.
    pub fn is_set(&self, dest: &str) -> bool {
        self.values.get(dest).is_some_and(|v| !v.is_none())
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get an option value by name. `Value::None` counts as missing.
    pub fn get(&self, dest: &str) -> FilterResult<&Value> {
        match self.values.get(dest) {
            Some(value) if !value.is_none() => Ok(value),
            _ => Err(FilterError::MissingOption {
                filter: self.filter.clone(),
                option: dest.to_string(),
            }),
        }
    }

    /// Get an option value if it is set.
    pub fn get_opt(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest).filter(|v| !v.is_none())
    }

    /// Get an option as an integer.
    pub fn get_integer(&self, dest: &str) -> FilterResult<i64> {
        let value = self.get(dest)?;
        value
            .as_integer()
            .ok_or_else(|| self.mismatch(dest, ValueType::Integer, value))
    }

    /// Get an option as a float.
    pub fn get_float(&self, dest: &str) -> FilterResult<f64> {
        let value = self.get(dest)?;
        value
            .as_float()
            .ok_or_else(|| self.mismatch(dest, ValueType::Float, value))
    }

    /// Get an option as a string.
    pub fn get_string(&self, dest: &str) -> FilterResult<&str> {
        let value = self.get(dest)?;
        value
            .as_string()
            .ok_or_else(|| self.mismatch(dest, ValueType::String, value))
    }

    /// Get an option as a boolean.
    pub fn get_bool(&self, dest: &str) -> FilterResult<bool> {
        let value = self.get(dest)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(dest, ValueType::Boolean, value))
    }

    /// Get an optional integer: `Ok(None)` when unset.
    pub fn get_integer_opt(&self, dest: &str) -> FilterResult<Option<i64>> {
        if self.is_set(dest) {
            self.get_integer(dest).map(Some)
        } else {
            Ok(None)
        }
    }

    fn mismatch(&self, dest: &str, expected: ValueType, got: &Value) -> FilterError {
        FilterError::TypeMismatch {
            filter: self.filter.clone(),
            option: dest.to_string(),
            expected,
            got: got.kind().to_string(),
        }
    }
}

/// A fully parsed filter invocation, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Parsed option values
    pub options: ParsedOptions,
    /// Positional values, exactly as many as the filter declares
    pub arguments: Vec<String>,
}

impl Invocation {
    /// Call the filter's entry point with this invocation.
    pub fn invoke(&self, filter: &dyn Filter) -> FilterResult<()> {
        filter.run(&self.options, &self.arguments)
    }
}
