// legacy-body-transcoder: convert legacy HTML bodies from files or stdin.
//
// Each FILE is one body. With no FILE, stdin is read as a single body.
// Warnings and errors go to the log (RUST_LOG, default "warn"); with --json
// they are also collected per body into the report.

use anyhow::{Context, Result};
use clap::Parser;
use legacy_body_transcoder::transcoder::{LogEntry, LogFacade, LogLevel};
use legacy_body_transcoder::{ConversionOptions, MemoryLogger, convert_with};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// JSON file with conversion options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of plain output
    #[arg(long)]
    json: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Input files (default: stdin)
    files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Record {
    source: String,
    output: String,
    entries: Vec<LogEntry>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = match &cli.config {
        Some(path) => ConversionOptions::from_json_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => ConversionOptions::default(),
    };

    let inputs = read_inputs(&cli.files)?;

    if cli.json {
        let records: Vec<Record> = inputs
            .into_iter()
            .map(|(source, body)| convert_to_record(source, &body, &options))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for (_, body) in inputs {
            println!("{}", convert_with(&body, &options, LogFacade));
        }
    }

    Ok(())
}

/// Convert one body, collecting its log entries and echoing them to the log
/// at their own level.
fn convert_to_record(source: String, body: &str, options: &ConversionOptions) -> Record {
    let logger = MemoryLogger::new();
    let output = convert_with(body, options, &logger);
    let entries = logger.entries();
    for entry in &entries {
        match entry.level {
            LogLevel::Warn => log::warn!("{source}: {} {}", entry.message, entry.context),
            LogLevel::Error => log::error!("{source}: {} {}", entry.message, entry.context),
        }
    }
    Record {
        source,
        output,
        entries,
    }
}

/// (source label, body) pairs in argument order.
fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("reading stdin")?;
        return Ok(vec![("<stdin>".to_string(), body)]);
    }

    files
        .iter()
        .map(|path| {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), body))
        })
        .collect()
}
