//! CLI argument definitions for the growth chart tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use growth_model::{Gender, Indicator, ReferenceSource};

#[derive(Parser)]
#[command(
    name = "growth",
    version,
    about = "Growth reference percentiles and chart series",
    long_about = "Estimate where anthropometric measurements fall on WHO and CDC growth\n\
                  references, and build chart series that combine reference curves with\n\
                  a patient's own measurements."
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

    /// Allow patient measurement values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List supported indicators and the reference tables they use.
    Indicators,

    /// Estimate the percentile of a single value.
    Percentile(PercentileArgs),

    /// Reconcile a measurement file onto a reference series.
    Chart(MeasurementArgs),

    /// Percentile label for every measurement in a file.
    Annotate(MeasurementArgs),

    /// Convert raw WHO/CDC downloads into standardized reference tables.
    Standardize(StandardizeArgs),
}

#[derive(Args)]
pub struct SeriesArgs {
    /// Directory of standardized reference tables ({code}_{gender}_{source}.csv).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Indicator name or short code (e.g. weight-for-age, wfa, bmi, wfh).
    #[arg(long = "indicator")]
    pub indicator: Indicator,

    /// boys or girls.
    #[arg(long = "gender")]
    pub gender: Gender,

    /// Reference source (who or cdc).
    #[arg(long = "source", default_value = "who")]
    pub source: ReferenceSource,

    /// Nearest reference point search.
    #[arg(long = "lookup", value_enum, default_value = "linear")]
    pub lookup: LookupArg,

    /// Drop reference rows whose percentile columns are not increasing.
    #[arg(long = "strict-monotone")]
    pub strict_monotone: bool,
}

#[derive(Args)]
pub struct PercentileArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Axis position: age in years, or height in cm for weight-for-height.
    #[arg(long = "axis", allow_negative_numbers = true)]
    pub axis: f64,

    /// Measured value in the indicator's unit.
    #[arg(long = "value", allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Args)]
pub struct MeasurementArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// CSV with date, age_years and metric columns.
    #[arg(long = "measurements", value_name = "FILE")]
    pub measurements: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct StandardizeArgs {
    /// Directory of raw WHO downloads.
    #[arg(long = "who-dir", value_name = "DIR")]
    pub who_dir: Option<PathBuf>,

    /// Directory of raw CDC downloads.
    #[arg(long = "cdc-dir", value_name = "DIR")]
    pub cdc_dir: Option<PathBuf>,

    /// Output directory for standardized tables.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LookupArg {
    Linear,
    Binary,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
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
