use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Prepare used-car listing exports for modeling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the feature pipeline over a listing export and emit the feature table
    Process(ProcessArgs),
    /// Produce summary statistics or frequency counts for the derived features
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input listing CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Calendar year for the vehicle-age calculation (defaults to the current year)
    #[arg(long = "as-of-year")]
    pub as_of_year: Option<i32>,
    /// Limit number of input rows processed
    #[arg(long)]
    pub limit: Option<usize>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter to use for output (defaults to input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Render the first few rows as an elastic table instead of writing CSV
    #[arg(long = "preview")]
    pub preview: bool,
    /// Render the full output as an elastic table to stdout
    #[arg(long = "table")]
    pub table: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input listing CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Calendar year for the vehicle-age calculation (defaults to the current year)
    #[arg(long = "as-of-year")]
    pub as_of_year: Option<i32>,
    /// Limit number of input rows processed
    #[arg(long)]
    pub limit: Option<usize>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Emit the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Produce frequency counts for categorical features instead of numeric summaries
    #[arg(long)]
    pub frequency: bool,
    /// Keep only the N most frequent values per column (0 keeps all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        v if v.len() == 1 => Ok(v.as_bytes()[0]),
        other => Err(format!("Unsupported delimiter '{other}'")),
    }
}
