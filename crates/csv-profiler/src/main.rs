//! CLI entry point for the streaming CSV profiler.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use csv_profiler::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DISTINCT_LIMIT, DEFAULT_SEEN_HASHES_LIMIT, DEFAULT_TOP_N,
};
use csv_profiler::{
    CsvRowSource, CsvSourceOptions, Profiler, ProfilerConfig, ReportFormat, ResultExt,
    render_json, write_report,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default HTML output path when `--output` is omitted.
const DEFAULT_HTML_OUTPUT: &str = "report.html";

/// CLI-compatible report format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Pretty-printed JSON
    Json,
    /// Self-contained HTML page
    Html,
}

impl From<CliFormat> for ReportFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Json => ReportFormat::Json,
            CliFormat::Html => ReportFormat::Html,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Profile a CSV and produce a report",
    long_about = "Streams a CSV file in bounded chunks and reports duplicate rows and, per column,\n\
                  null rate, distinct count, numeric statistics, inferred type and top values.\n\n\
                  EXAMPLES:\n  \
                  # JSON report to stdout\n  \
                  csv-profiler data.csv\n\n  \
                  # HTML report with the 10 most frequent values per column\n  \
                  csv-profiler data.csv --format html --top 10 -o report.html\n\n  \
                  # Treat NA and null as missing, semicolon-separated input\n  \
                  csv-profiler data.csv --null-marker '' --null-marker NA --null-marker null --delimiter ';'"
)]
struct Args {
    /// Path to input CSV
    input: PathBuf,

    /// Path to write report (stdout for JSON if omitted, report.html for HTML)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Top N frequent values to include
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: CliFormat,

    /// Maximum rows read per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Distinct values tracked exactly per column before reporting approximate
    #[arg(long, default_value_t = DEFAULT_DISTINCT_LIMIT)]
    distinct_limit: usize,

    /// Row hashes tracked for duplicate detection
    #[arg(long, default_value_t = DEFAULT_SEEN_HASHES_LIMIT)]
    seen_hashes_limit: usize,

    /// Value treated as null (repeatable; default is the empty string)
    #[arg(long = "null-marker", value_name = "VALUE")]
    null_markers: Vec<String>,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Trim whitespace around every field
    #[arg(long)]
    trim: bool,

    /// Report "integer" for numeric columns whose values are all integral
    #[arg(long)]
    infer_integers: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only ever carries the JSON report.
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
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = build_config(&args)?;
    debug!("Profiler configuration: {:?}", config);

    let options = CsvSourceOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        trim: args.trim,
    };
    let report = profile_file(&args.input, config, options)?;

    match ReportFormat::from(args.format) {
        ReportFormat::Json => match &args.output {
            Some(path) => write_report(&report, ReportFormat::Json, path)?,
            None => println!("{}", render_json(&report)?),
        },
        ReportFormat::Html => {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HTML_OUTPUT));
            write_report(&report, ReportFormat::Html, &path)?;
            println!("Wrote HTML report to {}", path.display());
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<ProfilerConfig> {
    let mut builder = ProfilerConfig::builder()
        .top_n(args.top)
        .chunk_size(args.chunk_size)
        .distinct_limit(args.distinct_limit)
        .seen_hashes_limit(args.seen_hashes_limit)
        .infer_integers(args.infer_integers);

    if !args.null_markers.is_empty() {
        builder = builder.null_markers(args.null_markers.iter().cloned());
    }

    Ok(builder.build()?)
}

fn profile_file(
    path: &Path,
    config: ProfilerConfig,
    options: CsvSourceOptions,
) -> Result<csv_profiler::Report> {
    info!("Loading dataset from: {}", path.display());
    let source = CsvRowSource::from_path_with_options(path, options)?;
    let report = Profiler::new(config)?
        .profile(source)
        .context(format!("Failed to profile {}", path.display()))?;
    info!(
        "Profile complete: {} rows, {} duplicates, {} columns",
        report.rows,
        report.duplicate_row_count,
        report.columns.len()
    );
    Ok(report)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| anyhow!("Delimiter must be a single ASCII character, got {:?}", delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["csv-profiler", "data.csv"]);
        assert_eq!(args.top, 5);
        assert_eq!(args.chunk_size, 100_000);
        assert!(args.null_markers.is_empty());
        assert!(matches!(args.format, CliFormat::Json));

        let config = build_config(&args).unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn test_args_null_markers_replace_default() {
        let args = Args::parse_from([
            "csv-profiler",
            "data.csv",
            "--null-marker",
            "NA",
            "--null-marker",
            "",
            "--format",
            "html",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.null_markers, vec!["NA".to_string(), String::new()]);
        assert!(matches!(args.format, CliFormat::Html));
    }

    #[test]
    fn test_invalid_chunk_size_rejected() {
        let args = Args::parse_from(["csv-profiler", "data.csv", "--chunk-size", "0"]);
        assert!(build_config(&args).is_err());
    }
}
