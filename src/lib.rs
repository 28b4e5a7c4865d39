//! # imgfilter - Command-line Image Filters
//!
//! imgfilter exposes a set of image filters behind a single command. The first
//! argument selects a filter, the rest is parsed against that filter's
//! declared options and positional arguments, and the filter runs with the
//! result.
//!
//! ## Features
//!
//! - **Declarative filters**: each filter describes its name, documentation,
//!   positional arguments and options through [`FilterMetadata`]
//! - **Generated parsers**: per-filter command-line parsers are built at run
//!   time from that metadata
//! - **Strict arity**: a filter is only called with exactly as many positional
//!   values as it declares
//! - **Extensible**: register custom filters next to the built-in ones
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imgfilter::prelude::*;
//!
//! let registry = FilterRegistry::with_builtins()?;
//! let dispatcher = Dispatcher::new(&registry, DispatcherConfig::new("imgfilter"));
//!
//! let args: Vec<String> = ["blur", "--sigma", "2.5", "in.png", "out.png"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let outcome = dispatcher.run(&args, &mut std::io::stdout(), &mut std::io::stderr())?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: value types, option specifications, the filter trait, errors
//! - [`filters`]: filter registry and built-in filters
//! - [`cli`]: mode selection, parser generation and help formatting
//!
//! ## Creating Custom Filters
//!
//! Implement the [`Filter`] trait:
//!
//! ```rust,ignore
//! use imgfilter::prelude::*;
//!
//! struct Threshold;
//!
//! impl Filter for Threshold {
//!     fn metadata(&self) -> FilterMetadata {
//!         FilterMetadata::builder("Threshold")
//!             .doc("Turns every pixel black or white.")
//!             .arguments(["input", "output"])
//!             .option(
//!                 OptionSpec::new("level", ValueType::Integer)
//!                     .with_short('l')
//!                     .with_default(128_i64)
//!                     .with_range(0.0, 255.0),
//!             )
//!             .build()
//!     }
//!
//!     fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
//!         let level = options.get_integer("level")?;
//!         // Process arguments[0] into arguments[1]...
//!         Ok(())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register(|| Box::new(Threshold))
//!     .build()?;
//! ```
//!
//! [`FilterMetadata`]: crate::core::filter::FilterMetadata
//! [`Filter`]: crate::core::filter::Filter

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod core;
pub mod filters;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use imgfilter::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{Value, ValueType};
    pub use crate::core::option::{Constraint, OptionAction, OptionSpec};
    pub use crate::core::filter::{Filter, FilterMetadata, FilterMetadataBuilder};
    pub use crate::core::invocation::{Invocation, ParsedOptions};

    // Errors
    pub use crate::core::error::{
        DispatchError, DispatchResult, FilterError, FilterResult, RegistryError, RegistryResult,
    };

    // Filters
    pub use crate::filters::registry::{FilterFactory, FilterRegistry, RegistryBuilder, RegistryEntry};

    // Built-in filters
    pub use crate::filters::builtin::{Blur, Crop, Flip, Gray, Invert, Rotate, Scale};

    // Command line
    pub use crate::cli::{Dispatcher, DispatcherConfig, FilterParser, Mode, Outcome};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "imgfilter");
    }

    #[test]
    fn test_builtins_listed_in_registration_order() {
        let registry = FilterRegistry::with_builtins().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec!["crop", "flip", "rotate", "scale", "gray", "invert", "blur"]
        );
    }

    #[test]
    fn test_every_builtin_builds_a_parser() {
        let registry = FilterRegistry::with_builtins().unwrap();
        for entry in registry.entries() {
            let parser = FilterParser::new("imgfilter", &entry.metadata);
            let help = parser.render_help();
            assert!(help.contains(&format!("imgfilter {}", entry.metadata.key())));
        }
    }

    #[test]
    fn test_custom_filter_next_to_builtins() {
        struct Noop;

        impl Filter for Noop {
            fn metadata(&self) -> FilterMetadata {
                FilterMetadata::builder("Noop").doc("Does nothing.").build()
            }

            fn run(&self, _options: &ParsedOptions, _arguments: &[String]) -> FilterResult<()> {
                Ok(())
            }
        }

        let registry = RegistryBuilder::new()
            .with_builtins(true)
            .register(|| Box::new(Noop) as Box<dyn Filter>)
            .build()
            .unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::new("imgfilter"));

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = dispatcher
            .run(&["NOOP".to_string()], &mut out, &mut err)
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert!(registry.contains("crop"));
    }
}
