use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sat_catalog::classify::IngestMode;
use sat_catalog::tle::{parse_multi_tle, parse_tle};
use sat_catalog::{Config, Ingestor};

#[derive(Parser)]
#[command(name = "sat-catalog")]
#[command(about = "Satellite catalog ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a JSON catalog export or a TLE text file
    Ingest {
        input: PathBuf,
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the configured ingest mode
        #[arg(long, value_enum)]
        mode: Option<IngestMode>,
        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Parse a TLE file and report malformed element sets
    Check { file: PathBuf },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            config,
            mode,
            now,
            output,
        } => ingest(&input, config.as_deref(), mode, now, output.as_deref()),
        Commands::Check { file } => check(&file),
    }
}

fn ingest(
    input: &Path,
    config: Option<&Path>,
    mode: Option<IngestMode>,
    now: Option<DateTime<Utc>>,
    output: Option<&Path>,
) -> ExitCode {
    let mut config = match config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(mode) = mode {
        config.ingest.mode = mode;
    }

    let ingestor = match Ingestor::from_config(&config) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let content = match fs::read_to_string(input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let now = now.unwrap_or_else(Utc::now);
    let is_json = input.extension().is_some_and(|ext| ext == "json");
    let result = if is_json {
        ingestor.ingest_json(&content, now)
    } else {
        ingestor.ingest_tle_text(&content, now)
    };

    let report = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Ingest failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing report: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Error writing {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            println!(
                "Accepted {} of {} records ({} active), report written to {}",
                report.counts.accepted,
                report.counts.received,
                report.active().count(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    ExitCode::SUCCESS
}

fn check(path: &Path) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sets = parse_multi_tle(&content);
    let mut failed = 0;
    for (i, set) in sets.iter().enumerate() {
        match parse_tle(set.name.as_deref(), &set.line1, &set.line2) {
            Ok(record) => println!(
                "  {}: {} ({}) epoch {}",
                i + 1,
                record.display_name(),
                record.catalog_id,
                record.epoch
            ),
            Err(e) => {
                failed += 1;
                println!("  {}: {}", i + 1, e);
            }
        }
    }

    println!("{} element sets, {} malformed", sets.len(), failed);
    if failed == 0 && !sets.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
