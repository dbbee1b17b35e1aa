//! DPP mapping CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dpp_cli::commands::{run_generate, run_map, run_validate};
use dpp_cli::logging::{LogConfig, LogFormat, init_logging};
use dpp_cli::types::GenerateResult;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_generate_summary, print_map_summary, print_validate_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Map(args) => match run_map(&args.input.to_options(), args.output.as_deref()) {
            Ok(result) => {
                print_map_summary(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Validate(args) => match run_validate(&args.input.to_options()) {
            Ok(result) => {
                print_validate_summary(&result);
                if result.has_errors { 1 } else { 0 }
            }
            Err(error) => report(&error),
        },
        Command::Generate(args) => {
            match run_generate(&args.input.to_options(), &args.to_options()) {
                Ok(result) => generate_exit_code(&result),
                Err(error) => report(&error),
            }
        }
    };
    std::process::exit(exit_code);
}

/// Records go to stdout unless an output file was given.
fn generate_exit_code(result: &GenerateResult) -> i32 {
    if result.output.is_none() && !result.blocked {
        match serde_json::to_string_pretty(&result.records) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("error: {error}");
                return 1;
            }
        }
        return 0;
    }
    print_generate_summary(result);
    if result.blocked { 1 } else { 0 }
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
