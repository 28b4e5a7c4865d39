//! Filter registry for managing available filter types.

use crate::core::error::{RegistryError, RegistryResult};
use crate::core::filter::{Filter, FilterMetadata};
use crate::core::option::{OptionAction, ARGUMENTS_DEST};
use crate::core::types::Value;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Factory function for creating filter instances.
pub type FilterFactory = Arc<dyn Fn() -> Box<dyn Filter> + Send + Sync>;

/// Registry entry containing metadata and factory.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Factory function to create instances.
    pub factory: FilterFactory,
    /// Cached metadata (avoids creating instance just to get metadata).
    pub metadata: FilterMetadata,
}

impl RegistryEntry {
    /// Create a fresh filter instance.
    pub fn create(&self) -> Box<dyn Filter> {
        (self.factory)()
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("metadata", &self.metadata)
            .field("factory", &"<closure>")
            .finish()
    }
}

/// Registry for all available filter types.
///
/// Filters are kept in registration order and looked up by their lowercased
/// name. Each name can be registered once; the registry is built at startup
/// and only read afterwards.
pub struct FilterRegistry {
    /// Filters indexed by their lowercased name.
    filters: IndexMap<String, RegistryEntry>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with built-in filters.
    pub fn with_builtins() -> RegistryResult<Self> {
        let mut registry = Self::new();
        crate::filters::builtin::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register a filter type.
    ///
    /// Fails if the metadata is malformed or if a filter with the same
    /// case-insensitive name already exists.
    pub fn register<F>(&mut self, factory: F) -> RegistryResult<()>
    where
        F: Fn() -> Box<dyn Filter> + Send + Sync + 'static,
    {
        // Create a temporary instance to get metadata
        let instance = factory();
        let metadata = instance.metadata();
        validate_metadata(&metadata)?;

        let key = metadata.key();
        if self.filters.contains_key(&key) {
            return Err(RegistryError::DuplicateFilter { name: key });
        }

        log::debug!("registered filter '{}'", metadata.name);
        self.filters.insert(
            key,
            RegistryEntry {
                factory: Arc::new(factory),
                metadata,
            },
        );
        Ok(())
    }

    /// Find a filter by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.filters.get(&name.to_lowercase())
    }

    /// Check if a filter is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(&name.to_lowercase())
    }

    /// Get all registered filter keys, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(|s| s.as_str())
    }

    /// Get all registered filters, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.filters.values()
    }

    /// Get the total number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that metadata can be turned into a working command line.
fn validate_metadata(metadata: &FilterMetadata) -> RegistryResult<()> {
    let invalid = |reason: String| RegistryError::InvalidMetadata {
        filter: metadata.name.clone(),
        reason,
    };

    if metadata.name.is_empty() || metadata.name.chars().any(char::is_whitespace) {
        return Err(invalid("name must be a single non-empty word".to_string()));
    }

    if metadata.arguments.iter().any(|a| a.trim().is_empty()) {
        return Err(invalid("positional argument names cannot be empty".to_string()));
    }

    let mut dests = HashSet::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();

    for option in &metadata.options {
        if option.dest.is_empty() || option.dest == ARGUMENTS_DEST {
            return Err(invalid(format!("invalid option name '{}'", option.dest)));
        }
        if !dests.insert(option.dest.as_str()) {
            return Err(invalid(format!("option '{}' declared twice", option.dest)));
        }
        if option.short.is_none() && option.long.is_none() {
            return Err(invalid(format!("option '{}' has no flag", option.dest)));
        }
        if let Some(short) = option.short {
            if short == 'h' || short == '-' || !shorts.insert(short) {
                return Err(invalid(format!("flag '-{}' is reserved or duplicated", short)));
            }
        }
        if let Some(long) = &option.long {
            if long.is_empty() || long == "help" || !longs.insert(long.as_str()) {
                return Err(invalid(format!("flag '--{}' is reserved or duplicated", long)));
            }
        }

        if option.required && !option.action.takes_value() {
            return Err(invalid(format!(
                "option '{}' cannot be required without taking a value",
                option.dest
            )));
        }

        match option.action {
            OptionAction::StoreTrue | OptionAction::StoreFalse => {
                if option.default_value.as_bool().is_none() {
                    return Err(invalid(format!(
                        "flag '{}' needs a boolean default",
                        option.dest
                    )));
                }
            }
            OptionAction::Count => {
                if option.default_value.as_integer().is_none() {
                    return Err(invalid(format!(
                        "counter '{}' needs an integer default",
                        option.dest
                    )));
                }
            }
            OptionAction::Store | OptionAction::Append => {
                if let Err(error) = option.validate(&option.default_value) {
                    return Err(invalid(format!(
                        "default of '{}' is invalid: {}",
                        option.dest, error
                    )));
                }
                if option.action == OptionAction::Append
                    && !matches!(option.default_value, Value::List(_))
                {
                    return Err(invalid(format!(
                        "repeated option '{}' needs a list default",
                        option.dest
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Builder for creating a customized registry.
pub struct RegistryBuilder {
    registry: FilterRegistry,
    include_builtins: bool,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            registry: FilterRegistry::new(),
            include_builtins: true,
            error: None,
        }
    }

    /// Include or exclude built-in filters.
    pub fn with_builtins(mut self, include: bool) -> Self {
        self.include_builtins = include;
        self
    }

    /// Register a custom filter. The first failure is reported by `build`.
    pub fn register<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Filter> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            if let Err(e) = self.registry.register(factory) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Build the registry. Built-ins come after custom filters.
    pub fn build(mut self) -> RegistryResult<FilterRegistry> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.include_builtins {
            crate::filters::builtin::register_all(&mut self.registry)?;
        }
        Ok(self.registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
