//! Command-line layer.
//!
//! Mode selection, per-filter option parsing and help formatting.

pub mod config;
pub mod dispatcher;
pub mod format;
pub mod parser;

pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, Mode, Outcome, EXIT_INFO};
pub use format::{filter_table, format_doc, usage};
pub use parser::FilterParser;
