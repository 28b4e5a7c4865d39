//! Core types and traits for imgfilter.
//!
//! This module contains the foundational types shared by the registry and the
//! command-line layer:
//! - Option value types
//! - Declarative option specifications
//! - The filter trait and its metadata
//! - Parsed invocations
//! - Error types

pub mod types;
pub mod option;
pub mod error;
pub mod invocation;
pub mod filter;

// Re-export commonly used types
pub use types::{Value, ValueType};
pub use option::{Constraint, OptionAction, OptionSpec};
pub use error::{DispatchError, FilterError, RegistryError};
pub use invocation::{Invocation, ParsedOptions};
pub use filter::{Filter, FilterMetadata};
