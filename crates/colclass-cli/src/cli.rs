//! CLI argument definitions for the column classifier.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use colclass_cli::workflow::{TypeAssignment, parse_type_assignment};

#[derive(Parser)]
#[command(
    name = "colclass",
    version,
    about = "Classify dataset columns as nominal, ordinal or numeric",
    long_about = "Load a CSV file, flag columns with few distinct values, classify them\n\
                  and export the data reordered as nominal, ordinal, numeric.\n\n\
                  Run and export stay disabled until every flagged column is classified."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Settings file (default: settings.toml in the user config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show columns, cardinalities, types and warnings.
    Inspect(InspectArgs),

    /// Write the data reordered by column type, without a header row.
    Export(ExportArgs),

    /// Run the averaging task over the numeric columns.
    Average(AverageArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args)]
pub struct ClassifyArgs {
    /// CSV file to load.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Cardinality threshold; columns with fewer distinct values are flagged.
    #[arg(long = "threshold", value_name = "N")]
    pub threshold: Option<String>,

    /// Classify a column: COLUMN is "Feature #n", an index or a header label.
    #[arg(
        long = "type",
        value_name = "COLUMN=TYPE",
        value_parser = parse_type_assignment
    )]
    pub types: Vec<TypeAssignment>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub classify: ClassifyArgs,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub classify: ClassifyArgs,

    /// Output CSV path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Replace the output file if it exists.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Args)]
pub struct AverageArgs {
    #[command(flatten)]
    pub classify: ClassifyArgs,

    /// Stop the calculation after this many seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
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
