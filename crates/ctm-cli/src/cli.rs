//! CLI argument definitions for the trial matcher.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tracing::level_filters::LevelFilter;

use ctm_cli::logging::LogFormat;
use ctm_core::DEFAULT_STATUSES;
use ctm_registry::{DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

#[derive(Parser)]
#[command(
    name = "ctm",
    version,
    about = "Clinical trial matcher - match patients to registered clinical trials",
    long_about = "Match a patient population against publicly registered clinical trials.\n\n\
                  Each patient's first condition and age drive a registry search; returned\n\
                  trials are filtered on structured age/sex criteria and condition overlap."
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

    /// Include patient values (conditions) in logs. Off by default for PHI safety.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match every patient in a data folder and write the match reports.
    Match(MatchArgs),

    /// Print the registry request that would be issued for a condition and age.
    Query(QueryArgs),
}

/// Registry connection flags shared by subcommands.
#[derive(clap::Args)]
pub struct RegistryArgs {
    /// Registry study search endpoint.
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Studies requested per page.
    #[arg(
        long = "page-size",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub page_size: u32,

    /// Registry status filter (repeatable).
    #[arg(
        long = "status",
        value_name = "STATUS",
        default_values_t = DEFAULT_STATUSES.map(String::from)
    )]
    pub statuses: Vec<String>,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Folder containing patients.csv and conditions.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for reports (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report format to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Match and summarise without writing reports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Abort the run on the first registry failure.
    ///
    /// By default a failed patient is recorded, the remaining patients are
    /// still matched, and the failed ids are listed at the end.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Date patient ages are computed against (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,

    /// Index of the patient condition used as the registry search term.
    #[arg(long = "anchor-condition", value_name = "INDEX", default_value_t = 0)]
    pub anchor_condition: usize,

    /// Per-request timeout in seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Pages fetched per patient before the fetch is reported as a failure.
    #[arg(
        long = "max-pages",
        value_name = "N",
        default_value_t = DEFAULT_MAX_PAGES,
        value_parser = parse_max_pages
    )]
    pub max_pages: usize,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Condition search term.
    #[arg(value_name = "CONDITION")]
    pub condition: String,

    /// Patient age in years.
    #[arg(long = "age", value_name = "YEARS")]
    pub age: u32,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
    Both,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn parse_max_pages(value: &str) -> Result<usize, String> {
    let pages: usize = value.parse().map_err(|e| format!("{e}"))?;
    if pages == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(pages)
}
