//! CLI entry point for the dataset quality assessment engine.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lex_quality::policy::DEFAULT_BENCHMARK_LIMIT;
use lex_quality::{AssessmentConfig, QualityService, RecordValue, ReportOptions};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Dataset quality assessment and model-fitness scoring",
    long_about = "Profiles CSV datasets, flags quality problems and decides which model \
                  families the data is fit for.\n\n\
                  Results are printed to stdout as JSON; logs go to stderr.\n\n\
                  EXAMPLES:\n  \
                  # Quality flags for a file\n  \
                  lex-quality flags data.csv\n\n  \
                  # Full reports for several files, then the benchmark history\n  \
                  lex-quality report a.csv b.csv --correlation --categories\n\n  \
                  # Fitness of a single record\n  \
                  lex-quality evaluate-record --data '{\"age\": 31, \"city\": \"Oslo\"}'"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Service status and version
    Health,

    /// Quality flags for a CSV file
    Flags { file: PathBuf },

    /// Per-column profile of a CSV file
    Summary { file: PathBuf },

    /// Missing-value analysis of a CSV file
    Missing { file: PathBuf },

    /// Full reports for one or more CSV files, followed by the benchmark history
    Report {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Include the correlation matrix of numeric columns
        #[arg(long)]
        correlation: bool,

        /// Include the most frequent values of categorical columns
        #[arg(long)]
        categories: bool,

        /// Number of recent records in the benchmark history (clamped to 1-100)
        #[arg(long, default_value_t = DEFAULT_BENCHMARK_LIMIT as i64)]
        benchmark_limit: i64,
    },

    /// Model fitness verdicts for a CSV file
    Evaluate {
        file: PathBuf,

        /// Minimum quality score for neural networks (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Model fitness verdicts for a single JSON record
    EvaluateRecord {
        /// JSON object of column name to string or number
        #[arg(long)]
        data: String,

        /// Minimum quality score for neural networks (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// Logs are written to stderr so stdout only ever carries JSON.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // .env may set RUST_LOG, so load it before building the filter
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    let service = QualityService::new(AssessmentConfig::default())?;
    debug!("Service ready: {:?}", service.config());

    match &args.command {
        Command::Health => emit(&service.health(), args.pretty),
        Command::Flags { file } => {
            let (name, bytes) = read_upload(file)?;
            emit(&service.flags_from_file(&name, &bytes)?, args.pretty)
        }
        Command::Summary { file } => {
            let (name, bytes) = read_upload(file)?;
            emit(&service.summary_from_file(&name, &bytes)?, args.pretty)
        }
        Command::Missing { file } => {
            let (name, bytes) = read_upload(file)?;
            emit(&service.missing_analysis_from_file(&name, &bytes)?, args.pretty)
        }
        Command::Report {
            files,
            correlation,
            categories,
            benchmark_limit,
        } => {
            let defaults = service.default_report_options();
            let options = ReportOptions {
                include_correlation: *correlation || defaults.include_correlation,
                include_categories: *categories || defaults.include_categories,
            };
            for file in files {
                let (name, bytes) = read_upload(file)?;
                emit(&service.full_report_from_file(&name, &bytes, options)?, args.pretty)?;
            }
            info!("Processed {} files", files.len());
            emit(&service.benchmark(*benchmark_limit), args.pretty)
        }
        Command::Evaluate { file, threshold } => {
            let (name, bytes) = read_upload(file)?;
            emit(&service.evaluate_file(&name, &bytes, *threshold)?, args.pretty)
        }
        Command::EvaluateRecord { data, threshold } => {
            let record: BTreeMap<String, RecordValue> =
                serde_json::from_str(data).context("--data must be a flat JSON object")?;
            emit(&service.evaluate_record(&record, *threshold)?, args.pretty)
        }
    }
}

/// Read a file as an upload: its bare name plus raw bytes.
fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file path: {}", path.display()))?
        .to_string();
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((name, bytes))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
