//! CLI argument definitions for the `dpp` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dpp_cli::commands::{GenerateOptions, InputOptions};

#[derive(Parser)]
#[command(
    name = "dpp",
    version,
    about = "Map CSV product exports onto Digital Product Passport schemas",
    long_about = "Map CSV product exports onto Digital Product Passport schemas.\n\n\
                  Proposes a header-to-field mapping, validates it against the schema's\n\
                  constraints, and generates one JSON-LD record per CSV row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Propose a mapping and print it; optionally save it as JSON.
    Map(MapArgs),

    /// Validate a mapping against the schema's constraints.
    Validate(ValidateArgs),

    /// Generate JSON-LD records from the CSV rows.
    Generate(GenerateArgs),
}

/// Inputs shared by all subcommands.
#[derive(Args)]
pub struct InputArgs {
    /// CSV file with a single header row.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: PathBuf,

    /// Flattened schema field list (JSON).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: PathBuf,

    /// Saved mapping (JSON object of header to path). Auto-mapped when omitted.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Auto-mapper candidate cutoff; pairs scoring at or above it are dropped.
    #[arg(long = "cutoff", value_name = "SCORE")]
    pub cutoff: Option<f64>,
}

impl InputArgs {
    pub fn to_options(&self) -> InputOptions {
        InputOptions {
            csv: self.csv.clone(),
            schema: self.schema.clone(),
            mapping: self.mapping.clone(),
            cutoff: self.cutoff,
        }
    }
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the mapping to this JSON file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Sector whose context is added to each record (repeatable).
    #[arg(long = "sector", value_name = "NAME")]
    pub sectors: Vec<String>,

    /// Base URL for JSON-LD context documents.
    #[arg(long = "context-base", value_name = "URL")]
    pub context_base: Option<String>,

    /// Refuse to generate records when validation finds errors.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,

    /// Write records to this JSON file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            sectors: self.sectors.clone(),
            context_base: self.context_base.clone(),
            fail_on_issues: self.fail_on_issues,
            output: self.output.clone(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
