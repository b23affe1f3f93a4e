//! CLI argument definitions for the lab interpretation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cdss",
    version,
    about = "Clinical decision support - lab result interpretation",
    long_about = "Interpret laboratory panels (blood gas, electrolytes, renal, hepatic,\n\
                  hematology, cardiac markers, metabolic) from raw value mappings.\n\
                  Produces a clinical narrative, abnormality tags, criticality flag,\n\
                  recommendations and an auditable detail map."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Interpret a single analysis request from a JSON file.
    Analyze(AnalyzeArgs),

    /// Interpret a CSV of parameter/value rows for one panel.
    Batch(BatchArgs),

    /// List all registered lab panels.
    Panels,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to a JSON request: {"panel": "...", "values": {...}, "age": ..., "sex": ...}.
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,

    /// Override the panel code from the request file.
    #[arg(long = "panel", value_name = "CODE")]
    pub panel: Option<String>,

    /// Write the full result as a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Path to a CSV file with `parametro,valor` rows.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Panel code to interpret the rows with.
    #[arg(long = "panel", value_name = "CODE")]
    pub panel: String,

    /// Patient age in years (for age-dependent derivations).
    #[arg(long = "age", value_name = "YEARS")]
    pub age: Option<u32>,

    /// Patient sex (M/F) for sex-specific reference ranges.
    #[arg(long = "sex", value_name = "SEX")]
    pub sex: Option<String>,

    /// Write the full result as a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
