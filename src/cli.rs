use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate filterable dashboard data from tabular files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer column types and summary facts from a data file
    Probe(ProbeArgs),
    /// Derive chart specifications from a file's column schema
    Plan(PlanArgs),
    /// Aggregate one chart's series from (optionally filtered) rows
    Chart(ChartArgs),
    /// Export the filtered row set as CSV
    Export(ExportArgs),
    /// Print headline figures for a file
    Summary(SummaryArgs),
    /// Save a file's rows and schema as a dashboard record
    Save(SaveArgs),
    /// List saved dashboards
    List(ListArgs),
    /// Show a saved dashboard's schema and planned charts
    Open(OpenArgs),
    /// Toggle public sharing for a saved dashboard
    Share(ShareArgs),
    /// Delete a saved dashboard
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Write the inferred schema to this YAML file for later editing
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema YAML with user-edited column types
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Emit the plan as JSON for a rendering layer
    #[arg(long)]
    pub json: bool,
    /// Series color token, repeatable; overrides the default palette
    #[arg(long = "color", action = clap::ArgAction::Append)]
    pub colors: Vec<String>,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema YAML with user-edited column types
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Planned chart id (see `plan`); mutually exclusive with explicit columns
    #[arg(long)]
    pub id: Option<String>,
    /// Column whose values label each group
    #[arg(long = "label-column")]
    pub label_column: Option<String>,
    /// Numeric column to reduce per group
    #[arg(long = "value-column")]
    pub value_column: Option<String>,
    /// Chart type override (bar, line, pie, area)
    #[arg(long = "type")]
    pub chart_type: Option<String>,
    /// Aggregation override (sum, average, count)
    #[arg(long = "agg")]
    pub aggregation: Option<String>,
    /// Row filters such as `Region=East,West`, repeatable
    #[arg(long = "filter", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
    /// Emit the series as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema YAML with user-edited column types
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Row filters such as `Region=East,West`, repeatable
    #[arg(long = "filter", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema YAML with user-edited column types
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Row filters such as `Region=East,West`, repeatable
    #[arg(long = "filter", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
    /// Emit the figures as JSON
    #[arg(long)]
    pub json: bool,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Input data file (.csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema YAML with user-edited column types
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Store directory holding dashboard records
    #[arg(short, long)]
    pub store: PathBuf,
    /// Display name for the saved dashboard
    #[arg(short, long)]
    pub name: String,
    /// Owner recorded on the dashboard
    #[arg(long, default_value = "local")]
    pub owner: String,
    /// Mark the dashboard public and assign a share token
    #[arg(long)]
    pub public: bool,
    /// Delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Store directory holding dashboard records
    #[arg(short, long)]
    pub store: PathBuf,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Store directory holding dashboard records
    #[arg(short, long)]
    pub store: PathBuf,
    /// Dashboard id to open
    #[arg(long)]
    pub id: Option<String>,
    /// Share token of a public dashboard to open
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Store directory holding dashboard records
    #[arg(short, long)]
    pub store: PathBuf,
    /// Dashboard id to toggle
    #[arg(long)]
    pub id: String,
    /// Make the dashboard private again
    #[arg(long)]
    pub off: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Store directory holding dashboard records
    #[arg(short, long)]
    pub store: PathBuf,
    /// Dashboard id to delete
    #[arg(long)]
    pub id: String,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
