//! Isoline extraction CLI.
//!
//! Reads a YAML job file, contours the field it describes and writes the
//! resulting isolines as JSON to a file or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use isoline_cli::JobConfig;

#[derive(Parser, Debug)]
#[command(name = "isoline-cli")]
#[command(about = "Extract isolines from a gridded scalar field")]
struct Args {
    /// Job configuration file (YAML)
    #[arg(short, long, env = "ISOLINE_CONFIG")]
    config: PathBuf,

    /// Output file for the JSON result (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the job's levels with this many evenly spaced levels
    #[arg(long)]
    levels: Option<usize>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays clean for the JSON result.
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    info!(config = %args.config.display(), "Starting isoline job");

    let mut config = JobConfig::from_file(&args.config)?;
    if let Some(levels) = args.levels {
        config.override_levels(levels);
    }
    config.validate().context("Invalid job configuration")?;

    let output = isoline_cli::run(&config)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &output)?;
            writer.flush()?;
            info!(path = %path.display(), "Wrote isolines");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &output)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
