use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

pub mod commands;

/// Install the `env_logger` backend. Defaults to warnings only; `RUST_LOG`
/// overrides. Safe to call more than once.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Parse process arguments, exiting with status 1 on a usage error.
///
/// Clap's own exit code for usage errors is 2; every failure of these tools
/// is reported as 1. `--help` and `--version` still exit 0.
pub fn parse_args<P: Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

/// The process working directory, resolved once per invocation.
pub fn working_directory() -> Result<PathBuf> {
    env::current_dir().context("Failed to get current directory")
}

/// Dump every environment variable at debug level.
pub fn log_environment() {
    for (key, value) in env::vars_os() {
        log::debug!("env: {}={}", key.to_string_lossy(), value.to_string_lossy());
    }
}
