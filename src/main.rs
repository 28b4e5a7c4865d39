//! imgfilter CLI
//!
//! Runs one image filter per invocation. See `imgfilter help`.

use anyhow::Context;
use imgfilter::prelude::*;
use std::io::Write;
use std::process;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args();
    let config = match args.next() {
        Some(argv0) => DispatcherConfig::from_argv0(&argv0),
        None => DispatcherConfig::default(),
    };
    let args: Vec<String> = args.collect();

    let registry = FilterRegistry::with_builtins().context("failed to build the filter registry")?;
    log::debug!("{} v{} with {} filter(s)", imgfilter::NAME, imgfilter::VERSION, registry.len());

    let dispatcher = Dispatcher::new(&registry, config);
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();

    match dispatcher.run(&args, &mut out, &mut err) {
        Ok(outcome) => {
            out.flush()?;
            err.flush()?;
            process::exit(outcome.exit_code())
        }
        Err(DispatchError::Usage(e)) => {
            drop(out);
            drop(err);
            e.exit()
        }
        Err(e) => Err(e.into()),
    }
}
