//! Command dispatcher.
//!
//! Selects what to do from the raw argument list: print the usage, print the
//! filter listing, report an unknown command, or parse and run a filter.

use crate::cli::config::DispatcherConfig;
use crate::cli::format::{filter_table, usage};
use crate::cli::parser::FilterParser;
use crate::core::error::DispatchResult;
use crate::filters::registry::{FilterRegistry, RegistryEntry};
use std::io::Write;

/// Exit status of the informational modes (usage, listing, unknown command).
pub const EXIT_INFO: i32 = 1;

const HELP_ALIASES: [&str; 4] = ["--help", "-h", "help", "-?"];
const LIST_ALIASES: [&str; 2] = ["list", "-l"];

/// What a command line asks for.
#[derive(Debug)]
pub enum Mode<'r> {
    /// Print the top-level usage
    Help,
    /// Print the filter listing
    List,
    /// Parse the remaining arguments and run a filter
    Run {
        /// Registry entry of the selected filter
        entry: &'r RegistryEntry,
        /// Filter name as typed
        token: String,
        /// Arguments after the filter name
        remaining: Vec<String>,
    },
    /// Single argument that is neither an alias nor a filter
    Unknown(String),
}

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Informational mode; the process should exit with this status
    Exit(i32),
    /// A filter ran to completion
    Completed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Exit(code) => code,
            Outcome::Completed => 0,
        }
    }
}

/// Routes a command line to the matching filter.
pub struct Dispatcher<'r> {
    registry: &'r FilterRegistry,
    config: DispatcherConfig,
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher over a fully built registry.
    pub fn new(registry: &'r FilterRegistry, config: DispatcherConfig) -> Self {
        Self { registry, config }
    }

    /// Decide the mode for `args` (program name excluded).
    pub fn resolve(&self, args: &[String]) -> Mode<'r> {
        match args {
            [] => Mode::Help,
            [command] => {
                if is_alias(command, &HELP_ALIASES) {
                    Mode::Help
                } else if is_alias(command, &LIST_ALIASES) {
                    Mode::List
                } else if let Some(entry) = self.registry.find(command) {
                    Mode::Run {
                        entry,
                        token: command.clone(),
                        remaining: Vec::new(),
                    }
                } else {
                    Mode::Unknown(command.clone())
                }
            }
            [command, rest @ ..] => match self.registry.find(command) {
                Some(entry) => Mode::Run {
                    entry,
                    token: command.clone(),
                    remaining: rest.to_vec(),
                },
                None => Mode::Help,
            },
        }
    }

    /// Dispatch `args`, writing informational output to `out` and
    /// diagnostics to `err`.
    pub fn run<W, E>(&self, args: &[String], out: &mut W, err: &mut E) -> DispatchResult<Outcome>
    where
        W: Write,
        E: Write,
    {
        let mode = self.resolve(args);
        log::debug!("dispatching {} argument(s) as {}", args.len(), mode_name(&mode));

        match mode {
            Mode::Help => {
                write!(out, "{}", usage(&self.config.program))?;
                Ok(Outcome::Exit(EXIT_INFO))
            }
            Mode::List => {
                write!(
                    out,
                    "{}",
                    filter_table(self.registry, self.config.width, &self.config.prefix)
                )?;
                Ok(Outcome::Exit(EXIT_INFO))
            }
            Mode::Unknown(command) => {
                log::debug!("unknown command '{}'", command);
                writeln!(err, "ERROR: I do not understand command \"{}\"", command)?;
                writeln!(err, "For a list of known filters, type \"list\"")?;
                Ok(Outcome::Exit(EXIT_INFO))
            }
            Mode::Run {
                entry,
                token,
                remaining,
            } => {
                self.handle_filter(entry, &token, &remaining)?;
                Ok(Outcome::Completed)
            }
        }
    }

    /// Parse `remaining` against the entry's options and run a fresh filter
    /// instance with the result.
    pub fn handle_filter(
        &self,
        entry: &RegistryEntry,
        token: &str,
        remaining: &[String],
    ) -> DispatchResult<()> {
        let parser = FilterParser::new(&self.config.program, &entry.metadata);
        let invocation = parser.parse(token, remaining)?;

        log::info!(
            "running {} with {} argument(s)",
            entry.metadata.name,
            invocation.arguments.len()
        );
        let filter = entry.create();
        invocation.invoke(filter.as_ref())?;
        Ok(())
    }
}

fn is_alias(command: &str, aliases: &[&str]) -> bool {
    aliases.iter().any(|alias| alias.eq_ignore_ascii_case(command))
}

fn mode_name(mode: &Mode<'_>) -> &'static str {
    match mode {
        Mode::Help => "help",
        Mode::List => "list",
        Mode::Run { .. } => "run",
        Mode::Unknown(_) => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{DispatchError, FilterError, FilterResult};
    use crate::core::filter::{Filter, FilterMetadata};
    use crate::core::invocation::ParsedOptions;
    use crate::core::option::OptionSpec;
    use crate::core::types::ValueType;
    use clap::error::ErrorKind;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(ParsedOptions, Vec<String>)>>>;

    struct Recorder {
        name: &'static str,
        doc: &'static str,
        arguments: Vec<&'static str>,
        calls: Calls,
        fail: bool,
    }

    impl Filter for Recorder {
        fn metadata(&self) -> FilterMetadata {
            FilterMetadata::builder(self.name)
                .doc(self.doc)
                .arguments(self.arguments.iter().copied())
                .option(OptionSpec::new("width", ValueType::Integer).with_short('w'))
                .build()
        }

        fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((options.clone(), arguments.to_vec()));
            if self.fail {
                return Err(FilterError::execution(self.name, "boom"));
            }
            Ok(())
        }
    }

    fn recorder(
        registry: &mut FilterRegistry,
        name: &'static str,
        doc: &'static str,
        arguments: Vec<&'static str>,
        fail: bool,
    ) -> Calls {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&calls);
        registry
            .register(move || {
                Box::new(Recorder {
                    name,
                    doc,
                    arguments: arguments.clone(),
                    calls: Arc::clone(&shared),
                    fail,
                }) as Box<dyn Filter>
            })
            .unwrap();
        calls
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn dispatch(registry: &FilterRegistry, values: &[&str]) -> (DispatchResult<Outcome>, String, String) {
        let dispatcher = Dispatcher::new(registry, DispatcherConfig::new("prog"));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = dispatcher.run(&args(values), &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_no_arguments_prints_usage() {
        let registry = FilterRegistry::new();
        let (result, out, err) = dispatch(&registry, &[]);
        assert_eq!(result.unwrap(), Outcome::Exit(1));
        assert!(out.contains("$ prog list"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_help_aliases_any_case() {
        let registry = FilterRegistry::new();
        for alias in ["--help", "-h", "help", "-?", "HELP", "--HELP", "-H", "Help"] {
            let (result, out, _) = dispatch(&registry, &[alias]);
            assert_eq!(result.unwrap(), Outcome::Exit(1), "alias {}", alias);
            assert!(out.contains("prog crop --help"));
        }
    }

    #[test]
    fn test_list_rows_in_registry_order() {
        let mut registry = FilterRegistry::new();
        recorder(&mut registry, "Zeta", "Last letter.", vec![], false);
        recorder(&mut registry, "Alpha", "First letter.", vec![], false);

        for alias in ["list", "-l", "LIST", "-L"] {
            let (result, out, _) = dispatch(&registry, &[alias]);
            assert_eq!(result.unwrap(), Outcome::Exit(1));

            let lines: Vec<&str> = out.lines().collect();
            assert_eq!(lines[0], " Filter    | Description");
            assert!(lines[1].starts_with("-----------+"));
            assert_eq!(lines[1].len(), 11 + 1 + 68);
            assert_eq!(lines[2], "zeta       | Last letter.");
            assert_eq!(lines[3], "alpha      | First letter.");
            assert_eq!(lines.len(), 4);
        }
    }

    #[test]
    fn test_list_wraps_long_docs() {
        let mut registry = FilterRegistry::new();
        recorder(
            &mut registry,
            "Sharpen",
            "Enhances the edges of the input image by subtracting a blurred copy of \
             it and adding the difference back with the given strength.",
            vec![],
            false,
        );

        let config = DispatcherConfig::new("prog").with_width(40);
        let prefix = config.prefix.clone();
        let dispatcher = Dispatcher::new(&registry, config);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = dispatcher.run(&args(&["list"]), &mut out, &mut err).unwrap();
        assert_eq!(outcome, Outcome::Exit(1));

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].len(), 40);
        assert!(lines[2].starts_with("sharpen    | Enhances"));
        assert!(lines.len() > 4);
        for line in &lines {
            assert!(line.chars().count() <= 40, "line too long: {:?}", line);
        }
        for line in &lines[3..] {
            assert!(line.starts_with(&prefix), "missing prefix: {:?}", line);
        }
    }

    #[test]
    fn test_unknown_command() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec![], false);

        let (result, out, err) = dispatch(&registry, &["frobnicate"]);
        assert_eq!(result.unwrap(), Outcome::Exit(1));
        assert!(out.is_empty());
        assert!(err.contains("ERROR: I do not understand command \"frobnicate\""));
        assert!(err.contains("For a list of known filters, type \"list\""));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_filter_name_with_zero_arguments() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec![], false);

        let (result, _, _) = dispatch(&registry, &["crop"]);
        assert_eq!(result.unwrap(), Outcome::Completed);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.is_empty());
        assert_eq!(calls[0].0.filter(), "Crop");
    }

    #[test]
    fn test_single_filter_name_missing_arguments() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec!["input", "output"], false);

        let (result, _, _) = dispatch(&registry, &["CROP"]);
        let err = result.unwrap_err();
        assert!(err.is_usage());
        match err {
            DispatchError::Usage(e) => assert_eq!(e.kind(), ErrorKind::WrongNumberOfValues),
            other => panic!("unexpected error: {other}"),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_filter_with_interleaved_options() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec!["input", "output"], false);

        let (result, _, _) = dispatch(&registry, &["Crop", "a.png", "-w", "10", "b.png"]);
        assert_eq!(result.unwrap(), Outcome::Completed);

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1, args(&["a.png", "b.png"]));
        assert_eq!(calls[0].0.get_integer("width").unwrap(), 10);
    }

    #[test]
    fn test_wrong_arity_never_calls_filter() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec!["input", "output"], false);

        let (result, _, _) = dispatch(&registry, &["crop", "a.png", "b.png", "c.png"]);
        let err = result.unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("requires 2 positional argument(s)"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unregistered_first_of_many_prints_usage() {
        let mut registry = FilterRegistry::new();
        let calls = recorder(&mut registry, "Crop", "Crops.", vec![], false);

        let (result, out, err) = dispatch(&registry, &["list", "crop"]);
        assert_eq!(result.unwrap(), Outcome::Exit(1));
        assert!(out.contains("Usage:"));
        assert!(err.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_filter_failure_propagates() {
        let mut registry = FilterRegistry::new();
        recorder(&mut registry, "Crop", "Crops.", vec!["input"], true);

        let (result, _, _) = dispatch(&registry, &["crop", "a.png"]);
        match result.unwrap_err() {
            DispatchError::Filter(FilterError::Execution { filter, error }) => {
                assert_eq!(filter, "Crop");
                assert_eq!(error, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_help_is_usage_display() {
        let mut registry = FilterRegistry::new();
        recorder(&mut registry, "Crop", "Crops.", vec!["input"], false);

        let (result, _, _) = dispatch(&registry, &["crop", "--help"]);
        match result.unwrap_err() {
            DispatchError::Usage(e) => {
                assert_eq!(e.kind(), ErrorKind::DisplayHelp);
                assert!(e.to_string().contains("prog crop [options] input"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_outcome_exit_code() {
        assert_eq!(Outcome::Exit(EXIT_INFO).exit_code(), 1);
        assert_eq!(Outcome::Completed.exit_code(), 0);
    }
}
