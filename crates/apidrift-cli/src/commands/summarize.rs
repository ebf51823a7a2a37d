//! Summarize command
//!
//! Usage: apidrift summarize --diff <FILE> --old <FILE> --new <FILE>
//!        [--format markdown|json] [--output <FILE>] [--fail-on-breaking]

use apidrift_core::errors::{ExError, SummaryError};
use apidrift_core::logging_facility::{self, Profile};
use apidrift_core::{summarize, ApiDocument, Report};
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown narrative
    Markdown,
    /// Full report as pretty-printed JSON
    Json,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Raw diff JSON produced by the comparison engine
    #[arg(long)]
    pub diff: PathBuf,

    /// Old API description (JSON or YAML)
    #[arg(long)]
    pub old: PathBuf,

    /// New API description (JSON or YAML)
    #[arg(long)]
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when the report contains breaking changes
    #[arg(long)]
    pub fail_on_breaking: bool,

    /// Logging profile: development or production (RUST_LOG overrides the filter)
    #[arg(long, default_value = "production")]
    pub log_profile: Profile,
}

fn read_diff(path: &Path) -> Result<Vec<u8>, ExError> {
    std::fs::read(path).map_err(|e| {
        ExError::from(SummaryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
        .with_op("read_diff")
    })
}

fn render(report: &Report, format: OutputFormat) -> Result<String, ExError> {
    match format {
        OutputFormat::Markdown => Ok(report.message.clone()),
        OutputFormat::Json => report
            .to_json_pretty()
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ExError::from(SummaryError::from(e)).with_op("render_json")),
    }
}

/// Execute summarize command
pub fn execute(args: SummarizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(args.log_profile);

    let diff = read_diff(&args.diff)?;
    let old_doc = ApiDocument::from_path(&args.old).map_err(ExError::from)?;
    let new_doc = ApiDocument::from_path(&args.new).map_err(ExError::from)?;

    let report = summarize(&diff, &old_doc, &new_doc).map_err(ExError::from)?;
    let rendered = render(&report, args.format)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, rendered)?;
        tracing::info!(path = %output_path.display(), "report written");
        println!("✓ Wrote report to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    if args.fail_on_breaking && report.breaking {
        let count = report.modified.iter().filter(|op| op.breaking).count();
        return Err(format!("{} breaking operation(s) detected", count).into());
    }

    Ok(())
}
