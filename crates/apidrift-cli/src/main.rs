//! apidrift CLI
//!
//! Command-line interface for summarizing OpenAPI compatibility diffs

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apidrift")]
#[command(about = "apidrift - OpenAPI compatibility reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize a raw comparison diff into a report
    Summarize(commands::summarize::SummarizeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summarize(args) => commands::summarize::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
