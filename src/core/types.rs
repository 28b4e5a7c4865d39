//! Value types produced by the per-filter option parser.
//!
//! Options are declared with a [`ValueType`] and come out of parsing as a
//! [`Value`]. The set is closed: a filter command line only ever carries
//! numbers, strings, booleans, counts and repeated values.

use std::fmt;

/// A parsed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string (also used for choices)
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Values collected from a repeated option
    List(Vec<Value>),
    /// Option not given and without a default
    None,
}

/// Declared type of an option's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// Free-form string
    String,
    /// `true`/`false` and the usual spellings
    Boolean,
    /// String restricted to a fixed set of values
    Choice(Vec<String>),
}

// ============================================================================
// Value Implementation
// ============================================================================

impl Value {
    /// Try to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Try to get this value as a float.
    /// Integers are automatically converted to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Check if this value is None.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::None => "none",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::None => write!(f, "None"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

// ============================================================================
// ValueType Implementation
// ============================================================================

impl ValueType {
    /// Check if a value matches this type. `None` matches every type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::None) => true,
            (ValueType::Integer, Value::Integer(_)) => true,
            (ValueType::Float, Value::Float(_)) => true,
            // Integer can be used where float is expected
            (ValueType::Float, Value::Integer(_)) => true,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::Boolean, Value::Boolean(_)) => true,
            (ValueType::Choice(choices), Value::String(s)) => choices.iter().any(|c| c == s),
            (_, Value::List(values)) => values.iter().all(|v| self.matches(v)),
            _ => false,
        }
    }

    /// Placeholder shown in help output for options of this type.
    pub fn metavar(&self) -> String {
        match self {
            ValueType::Integer => "INT".to_string(),
            ValueType::Float => "FLOAT".to_string(),
            ValueType::String => "STRING".to_string(),
            ValueType::Boolean => "BOOL".to_string(),
            ValueType::Choice(choices) => format!("{{{}}}", choices.join(",")),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Choice(choices) => write!(f, "choice of {}", choices.join("|")),
        }
    }
}
