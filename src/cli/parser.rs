//! Per-filter option parser.
//!
//! A [`FilterParser`] turns a filter's [`FilterMetadata`] into a
//! `clap::Command` at run time: one `Arg` per declared option plus a hidden
//! positional that collects every leftover value. Parsing yields an
//! [`Invocation`] or a clap usage error.

use crate::core::filter::FilterMetadata;
use crate::core::invocation::{Invocation, ParsedOptions};
use crate::core::option::{OptionAction, OptionSpec, ARGUMENTS_DEST};
use crate::core::types::{Value, ValueType};
use clap::builder::{PossibleValuesParser, ValueParser};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

/// Command-line parser for a single filter.
pub struct FilterParser<'a> {
    metadata: &'a FilterMetadata,
    command: Command,
}

impl<'a> FilterParser<'a> {
    /// Build the parser for `metadata`, named `"<program> <filter>"`.
    pub fn new(program: &str, metadata: &'a FilterMetadata) -> Self {
        let name = format!("{} {}", program, metadata.key());
        let mut usage = format!("{} [options]", name);
        for argument in &metadata.arguments {
            usage.push(' ');
            usage.push_str(argument);
        }

        let leftovers = Arg::new(ARGUMENTS_DEST)
            .action(ArgAction::Append)
            .value_parser(ValueParser::string())
            .allow_negative_numbers(true)
            .hide(true);

        let command = Command::new(name.clone())
            .bin_name(name)
            .about(metadata.doc.clone())
            .override_usage(usage)
            .disable_version_flag(true)
            .arg(leftovers)
            .args(metadata.options.iter().map(option_arg));

        log::debug!(
            "built parser for '{}' with {} option(s) and {} argument(s)",
            metadata.name,
            metadata.options.len(),
            metadata.arity()
        );
        Self { metadata, command }
    }

    /// The underlying clap command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Rendered `--help` text.
    pub fn render_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// Parse `remaining` for the filter invoked as `token`.
    ///
    /// `token` takes the first leftover slot, so parsing must leave exactly
    /// `arity + 1` positional values. The returned invocation drops it.
    pub fn parse(&self, token: &str, remaining: &[String]) -> Result<Invocation, clap::Error> {
        let argv = std::iter::once(self.command.get_name().to_string())
            .chain(std::iter::once(token.to_string()))
            .chain(remaining.iter().cloned());
        let matches = self.command.clone().try_get_matches_from(argv)?;

        let leftovers: Vec<String> = matches
            .get_many::<String>(ARGUMENTS_DEST)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let expected = self.metadata.arity();
        if leftovers.len() != expected + 1 {
            return Err(self.error(
                ErrorKind::WrongNumberOfValues,
                format!("this program requires {} positional argument(s)", expected),
            ));
        }

        let mut options = ParsedOptions::new(self.metadata.name.clone());
        for spec in &self.metadata.options {
            let value = collect_value(spec, &matches);
            if let Err(reason) = spec.validate(&value) {
                return Err(self.error(
                    ErrorKind::ValueValidation,
                    format!("option {}: {}", spec.display_flag(), reason),
                ));
            }
            options.insert(spec.dest.clone(), value);
        }

        Ok(Invocation {
            options,
            arguments: leftovers.into_iter().skip(1).collect(),
        })
    }

    fn error(&self, kind: ErrorKind, message: String) -> clap::Error {
        self.command.clone().error(kind, message)
    }
}

fn option_arg(spec: &OptionSpec) -> Arg {
    let mut arg = Arg::new(spec.dest.clone()).help(spec.help.clone());
    if let Some(short) = spec.short {
        arg = arg.short(short);
    }
    if let Some(long) = &spec.long {
        arg = arg.long(long.clone());
    }

    arg = match spec.action {
        OptionAction::StoreTrue => arg.action(ArgAction::SetTrue),
        OptionAction::StoreFalse => arg.action(ArgAction::SetFalse),
        OptionAction::Count => arg.action(ArgAction::Count),
        OptionAction::Store => arg
            .action(ArgAction::Set)
            .value_parser(value_parser_for(&spec.value_type)),
        OptionAction::Append => arg
            .action(ArgAction::Append)
            .value_parser(value_parser_for(&spec.value_type)),
    };

    if spec.action.takes_value() {
        let metavar = spec
            .metavar
            .clone()
            .unwrap_or_else(|| spec.value_type.metavar());
        arg = arg.value_name(metavar).required(spec.required);
        if matches!(spec.value_type, ValueType::Integer | ValueType::Float) {
            arg = arg.allow_negative_numbers(true);
        }
    }
    arg
}

fn value_parser_for(value_type: &ValueType) -> ValueParser {
    match value_type {
        ValueType::Integer => value_parser!(i64).into(),
        ValueType::Float => value_parser!(f64).into(),
        ValueType::String => ValueParser::string(),
        ValueType::Boolean => ValueParser::bool(),
        ValueType::Choice(choices) => PossibleValuesParser::new(choices.clone()).into(),
    }
}

/// Value of one option: parsed from the command line, or the declared
/// default when the option was not given.
fn collect_value(spec: &OptionSpec, matches: &ArgMatches) -> Value {
    let id = spec.dest.as_str();
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return spec.default_value.clone();
    }

    match spec.action {
        OptionAction::StoreTrue | OptionAction::StoreFalse => Value::Boolean(matches.get_flag(id)),
        OptionAction::Count => Value::Integer(i64::from(matches.get_count(id))),
        OptionAction::Store => one_value(&spec.value_type, matches, id),
        OptionAction::Append => Value::List(many_values(&spec.value_type, matches, id)),
    }
}

fn one_value(value_type: &ValueType, matches: &ArgMatches, id: &str) -> Value {
    let value = match value_type {
        ValueType::Integer => matches.get_one::<i64>(id).copied().map(Value::Integer),
        ValueType::Float => matches.get_one::<f64>(id).copied().map(Value::Float),
        ValueType::Boolean => matches.get_one::<bool>(id).copied().map(Value::Boolean),
        ValueType::String | ValueType::Choice(_) => {
            matches.get_one::<String>(id).cloned().map(Value::String)
        }
    };
    value.unwrap_or(Value::None)
}

fn many_values(value_type: &ValueType, matches: &ArgMatches, id: &str) -> Vec<Value> {
    match value_type {
        ValueType::Integer => matches
            .get_many::<i64>(id)
            .map(|v| v.copied().map(Value::Integer).collect()),
        ValueType::Float => matches
            .get_many::<f64>(id)
            .map(|v| v.copied().map(Value::Float).collect()),
        ValueType::Boolean => matches
            .get_many::<bool>(id)
            .map(|v| v.copied().map(Value::Boolean).collect()),
        ValueType::String | ValueType::Choice(_) => matches
            .get_many::<String>(id)
            .map(|v| v.cloned().map(Value::String).collect()),
    }
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::option::Constraint;

    fn metadata() -> FilterMetadata {
        FilterMetadata::builder("Crop")
            .doc("Crops an image")
            .arguments(["input", "output"])
            .option(
                OptionSpec::new("x", ValueType::Integer)
                    .with_short('x')
                    .with_default(0_i64)
                    .with_constraint(Constraint::NonNegative),
            )
            .option(OptionSpec::new("width", ValueType::Integer))
            .option(OptionSpec::new("sigma", ValueType::Float).with_default(1.0))
            .option(OptionSpec::flag("vertical").with_short('v'))
            .option(OptionSpec::counter("verbose").with_short('V').short_only())
            .option(OptionSpec::new("tag", ValueType::String).with_action(OptionAction::Append))
            .option(
                OptionSpec::new(
                    "angle",
                    ValueType::Choice(vec!["90".to_string(), "180".to_string()]),
                )
                .with_default("90"),
            )
            .build()
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positionals_and_defaults() {
        let metadata = metadata();
        let parser = FilterParser::new("prog", &metadata);
        let invocation = parser.parse("crop", &args(&["in.png", "out.png"])).unwrap();

        assert_eq!(invocation.arguments, args(&["in.png", "out.png"]));
        let options = &invocation.options;
        assert_eq!(options.filter(), "Crop");
        assert_eq!(options.get_integer("x").unwrap(), 0);
        assert!(!options.is_set("width"));
        assert_eq!(options.get_float("sigma").unwrap(), 1.0);
        assert!(!options.get_bool("vertical").unwrap());
        assert_eq!(options.get_integer("verbose").unwrap(), 0);
        assert_eq!(options.get_string("angle").unwrap(), "90");
        assert_eq!(options.len(), 7);
    }

    #[test]
    fn test_interleaved_options() {
        let metadata = metadata();
        let parser = FilterParser::new("prog", &metadata);
        let invocation = parser
            .parse(
                "CROP",
                &args(&[
                    "-x", "3", "in.png", "--width", "10", "-v", "-V", "-V", "out.png", "--tag",
                    "a", "--tag", "b", "--angle", "180", "--sigma", "2.5",
                ]),
            )
            .unwrap();

        assert_eq!(invocation.arguments, args(&["in.png", "out.png"]));
        let options = &invocation.options;
        assert_eq!(options.get_integer("x").unwrap(), 3);
        assert_eq!(options.get_integer("width").unwrap(), 10);
        assert!(options.get_bool("vertical").unwrap());
        assert_eq!(options.get_integer("verbose").unwrap(), 2);
        assert_eq!(
            options.get("tag").unwrap(),
            &Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(options.get_string("angle").unwrap(), "180");
        assert_eq!(options.get_float("sigma").unwrap(), 2.5);
    }

    #[test]
    fn test_wrong_positional_count() {
        let metadata = metadata();
        let parser = FilterParser::new("prog", &metadata);

        for values in [vec![], vec!["in.png"], vec!["a", "b", "c"]] {
            let err = parser.parse("crop", &args(&values)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::WrongNumberOfValues);
            assert!(err.to_string().contains("requires 2 positional argument(s)"));
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_usage_errors() {
        let metadata = metadata();
        let parser = FilterParser::new("prog", &metadata);

        let err = parser.parse("crop", &args(&["a", "b", "--bogus"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = parser.parse("crop", &args(&["a", "b", "--width", "wide"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parser.parse("crop", &args(&["a", "b", "--angle", "45"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = parser.parse("crop", &args(&["a", "b", "-x", "-2"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("--x"));
    }

    #[test]
    fn test_help_display() {
        let metadata = metadata();
        let parser = FilterParser::new("prog", &metadata);

        let err = parser.parse("crop", &args(&["--help"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);

        let help = parser.render_help();
        assert!(help.contains("prog crop [options] input output"));
        assert!(help.contains("Crops an image"));
        assert!(help.contains("--width"));
    }

    #[test]
    fn test_zero_arity_filter() {
        let metadata = FilterMetadata::builder("Noop").build();
        let parser = FilterParser::new("prog", &metadata);

        let invocation = parser.parse("noop", &[]).unwrap();
        assert!(invocation.arguments.is_empty());
        assert!(invocation.options.is_empty());
        assert_eq!(parser.command().get_name(), "prog noop");

        assert!(parser.parse("noop", &args(&["extra"])).is_err());
    }

    #[test]
    fn test_store_false_flag() {
        let metadata = FilterMetadata::builder("Save")
            .option(
                OptionSpec::flag("compress")
                    .with_long("no-compress")
                    .with_action(OptionAction::StoreFalse)
                    .with_default(true),
            )
            .build();
        let parser = FilterParser::new("prog", &metadata);

        let invocation = parser.parse("save", &[]).unwrap();
        assert!(invocation.options.get_bool("compress").unwrap());

        let invocation = parser.parse("save", &args(&["--no-compress"])).unwrap();
        assert!(!invocation.options.get_bool("compress").unwrap());
    }

    #[test]
    fn test_metavar_in_help() {
        let metadata = FilterMetadata::builder("Crop")
            .option(OptionSpec::new("width", ValueType::Integer).with_metavar("PIXELS"))
            .option(OptionSpec::new("height", ValueType::Integer))
            .build();
        let help = FilterParser::new("prog", &metadata).render_help();

        assert!(help.contains("--width <PIXELS>"));
        assert!(help.contains("--height <INT>"));
    }

    #[test]
    fn test_required_option() {
        let metadata = FilterMetadata::builder("Crop")
            .arguments(["input"])
            .option(OptionSpec::new("width", ValueType::Integer).required())
            .build();
        let parser = FilterParser::new("prog", &metadata);

        let err = parser.parse("crop", &args(&["in.png"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);

        let invocation = parser.parse("crop", &args(&["--width", "3", "in.png"])).unwrap();
        assert_eq!(invocation.options.get_integer("width").unwrap(), 3);

        let err = parser.parse("crop", &args(&["--help"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
