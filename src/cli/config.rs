//! Dispatcher configuration.

use std::path::Path;

/// Column budget of the filter listing.
pub const DEFAULT_WIDTH: usize = 80;

/// Continuation prefix of the filter listing; lines up with the `|` column.
pub const DEFAULT_PREFIX: &str = "           | ";

/// Settings that shape the dispatcher's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Program name used in usage lines and per-filter parser names
    pub program: String,
    /// Total width of the filter listing
    pub width: usize,
    /// Prefix of wrapped documentation lines in the listing
    pub prefix: String,
}

impl DispatcherConfig {
    /// Create a configuration with default layout for the given program name.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Use the basename of `argv[0]` as program name.
    pub fn from_argv0(argv0: &str) -> Self {
        let program = Path::new(argv0)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(env!("CARGO_PKG_NAME"));
        Self::new(program)
    }

    /// Set the listing width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the continuation prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            program: env!("CARGO_PKG_NAME").to_string(),
            width: DEFAULT_WIDTH,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argv0_takes_basename() {
        assert_eq!(DispatcherConfig::from_argv0("/usr/local/bin/filt").program, "filt");
        assert_eq!(DispatcherConfig::from_argv0("filt").program, "filt");
        assert_eq!(DispatcherConfig::from_argv0("").program, "imgfilter");
    }

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default().with_width(60);
        assert_eq!(config.width, 60);
        assert_eq!(config.prefix.len(), 13);
        assert!(config.prefix.ends_with("| "));
    }
}
