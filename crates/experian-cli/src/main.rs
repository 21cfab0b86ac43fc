mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::filing_date::DecodeFilingDateArgs;
use commands::parse::ParseArgs;

/// Summarise Experian credit-profile responses
#[derive(Parser)]
#[command(
    name = "xpn",
    version,
    about = "Summarise Experian credit-profile responses",
    long_about = "Reads the JSON body returned by Experian's credit-profile inquiry and \
                  reduces it to a flat summary: record-found flag, trade-line count, \
                  recent bankruptcy flag, profile-summary attributes and risk-model scores."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise one response body, or an array / stream of them
    Parse(ParseArgs),
    /// Show how a raw filingDate decodes and whether it is inside the window
    DecodeFilingDate(DecodeFilingDateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Parse(args) => commands::parse::run_parse(args),
        Commands::DecodeFilingDate(args) => commands::filing_date::run_decode_filing_date(args),
        Commands::Version => {
            println!("xpn {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
