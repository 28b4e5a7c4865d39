//! Filter trait and filter metadata.
//!
//! A filter is described entirely by its [`FilterMetadata`]: a name, a
//! documentation string, the positional arguments it expects and the options
//! it accepts. The dispatcher builds the command line from that description
//! and hands the parsed result to [`Filter::run`].

use crate::core::error::FilterResult;
use crate::core::invocation::ParsedOptions;
use crate::core::option::OptionSpec;

/// Metadata describing a filter's command-line surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMetadata {
    /// Identifier of the filter (e.g., "Crop"). Matched case-insensitively.
    pub name: String,
    /// Documentation shown in listings and in the filter's help
    pub doc: String,
    /// Names of the positional arguments, in order
    pub arguments: Vec<String>,
    /// Accepted options, in declaration order
    pub options: Vec<OptionSpec>,
}

impl FilterMetadata {
    /// Create a new metadata builder.
    pub fn builder(name: impl Into<String>) -> FilterMetadataBuilder {
        FilterMetadataBuilder::new(name)
    }

    /// Lookup key: the lowercased name.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Number of positional arguments the filter requires.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

/// Builder for FilterMetadata.
pub struct FilterMetadataBuilder {
    name: String,
    doc: String,
    arguments: Vec<String>,
    options: Vec<OptionSpec>,
}

impl FilterMetadataBuilder {
    /// Create a new builder with the filter name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            arguments: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Set the documentation string.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Add multiple positional arguments.
    pub fn arguments(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.arguments.extend(names.into_iter().map(|n| n.into()));
        self
    }

    /// Add an option.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Build the metadata.
    pub fn build(self) -> FilterMetadata {
        FilterMetadata {
            name: self.name,
            doc: self.doc,
            arguments: self.arguments,
            options: self.options,
        }
    }
}

/// The core trait for filters.
///
/// # Design
///
/// The dispatcher owns the whole command-line surface:
///
/// 1. **Description** (`metadata`): called at registration. The registry
///    validates and caches the result, and the parser is built from it.
///
/// 2. **Execution** (`run`): called once per invocation with every declared
///    option present in `options` (defaulted when not given) and exactly
///    `metadata().arity()` positional values.
///
/// # Example Implementation
///
/// ```ignore
/// struct Gray;
///
/// impl Filter for Gray {
///     fn metadata(&self) -> FilterMetadata {
///         FilterMetadata::builder("Gray")
///             .doc("Converts an image to grayscale")
///             .arguments(["input", "output"])
///             .build()
///     }
///
///     fn run(&self, _options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
///         let image = image::open(&arguments[0])?;
///         image.grayscale().save(&arguments[1])?;
///         Ok(())
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Get the metadata for this filter.
    ///
    /// This is called during registration and should return consistent values.
    fn metadata(&self) -> FilterMetadata;

    /// Run the filter with parsed options and positional values.
    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()>;
}
