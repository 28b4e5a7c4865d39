//! Declarative option specifications.
//!
//! Every filter describes its command-line options as a list of
//! [`OptionSpec`]s. The CLI layer turns these into a parser at run time, so a
//! filter never touches argument parsing itself.

use crate::core::types::{Value, ValueType};

/// Parser id that collects positional values. Not available as a `dest`.
pub const ARGUMENTS_DEST: &str = "__arguments";

/// What the parser does when it meets an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionAction {
    /// Store the single value that follows the flag
    Store,
    /// Set to `true` when present
    StoreTrue,
    /// Set to `false` when present
    StoreFalse,
    /// Count the number of occurrences
    Count,
    /// Collect every value into a list
    Append,
}

impl OptionAction {
    /// Whether this action consumes a value after the flag.
    pub fn takes_value(&self) -> bool {
        matches!(self, OptionAction::Store | OptionAction::Append)
    }
}

/// Constraints checked against a parsed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Numeric value must be within range [min, max]
    Range {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
    /// Numeric value must be >= min
    MinValue(f64),
    /// Numeric value must be <= max
    MaxValue(f64),
    /// Number must be positive (> 0)
    Positive,
    /// Number must be non-negative (>= 0)
    NonNegative,
}

/// Definition of a single command-line option of a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Key under which the parsed value is stored
    pub dest: String,
    /// Short flag character (`-x`)
    pub short: Option<char>,
    /// Long flag name without dashes (`--width`)
    pub long: Option<String>,
    /// Type of the option's value
    pub value_type: ValueType,
    /// Parser action
    pub action: OptionAction,
    /// Value used when the option is absent
    pub default_value: Value,
    /// Help text shown in the filter's `--help`
    pub help: String,
    /// Placeholder for the value in help output
    pub metavar: Option<String>,
    /// Constraints checked after parsing
    pub constraints: Vec<Constraint>,
    /// Parsing fails when the option is missing
    pub required: bool,
}

// ============================================================================
// OptionSpec Builder Pattern
// ============================================================================

impl OptionSpec {
    /// Create an option that stores one value of the given type.
    ///
    /// The long flag defaults to `dest` with underscores replaced by dashes.
    pub fn new(dest: impl Into<String>, value_type: ValueType) -> Self {
        let dest = dest.into();
        Self {
            long: Some(dest.replace('_', "-")),
            dest,
            short: None,
            value_type,
            action: OptionAction::Store,
            default_value: Value::None,
            help: String::new(),
            metavar: None,
            constraints: Vec::new(),
            required: false,
        }
    }

    /// Create a boolean flag that is `false` unless given.
    pub fn flag(dest: impl Into<String>) -> Self {
        Self::new(dest, ValueType::Boolean)
            .with_action(OptionAction::StoreTrue)
            .with_default(Value::Boolean(false))
    }

    /// Create a counter (`-v -v -v` yields 3).
    pub fn counter(dest: impl Into<String>) -> Self {
        Self::new(dest, ValueType::Integer)
            .with_action(OptionAction::Count)
            .with_default(Value::Integer(0))
    }

    /// Set the short flag.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Set the long flag (without leading dashes).
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Remove the long flag, leaving only the short one.
    pub fn short_only(mut self) -> Self {
        self.long = None;
        self
    }

    /// Set the parser action.
    ///
    /// Switching to `Append` resets the default to an empty list.
    pub fn with_action(mut self, action: OptionAction) -> Self {
        self.action = action;
        if action == OptionAction::Append {
            self.default_value = Value::List(Vec::new());
        }
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the value placeholder shown in help.
    pub fn with_metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    /// Make the option mandatory on the command line.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a range constraint.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.constraints.push(Constraint::Range { min, max });
        self
    }

    /// Add a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Flag as written on the command line, preferring the long form.
    pub fn display_flag(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long),
            (None, Some(short)) => format!("-{}", short),
            (None, None) => self.dest.clone(),
        }
    }

    /// Validate a value against this option's type and constraints.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        if !self.value_type.matches(value) {
            return Err(format!(
                "expected {}, got {}",
                self.value_type,
                value.kind()
            ));
        }

        let values: Vec<&Value> = match value {
            Value::List(items) => items.iter().collect(),
            Value::None => Vec::new(),
            other => vec![other],
        };

        for item in values {
            for constraint in &self.constraints {
                constraint.validate(item)?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// Constraint Validation
// ============================================================================

impl Constraint {
    /// Validate a value against this constraint.
    ///
    /// Non-numeric values pass every numeric constraint.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        let Some(num) = value.as_float() else {
            return Ok(());
        };

        match self {
            Constraint::Range { min, max } => {
                if num < *min || num > *max {
                    return Err(format!("value {} is out of range [{}, {}]", num, min, max));
                }
            }
            Constraint::MinValue(min) => {
                if num < *min {
                    return Err(format!("value {} is below minimum {}", num, min));
                }
            }
            Constraint::MaxValue(max) => {
                if num > *max {
                    return Err(format!("value {} is above maximum {}", num, max));
                }
            }
            Constraint::Positive => {
                if num <= 0.0 {
                    return Err(format!("value {} must be positive", num));
                }
            }
            Constraint::NonNegative => {
                if num < 0.0 {
                    return Err(format!("value {} must not be negative", num));
                }
            }
        }

        Ok(())
    }
}
