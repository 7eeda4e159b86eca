use anyhow::{Context, Result};
use clap::Parser;
use lineproto_core::DuplicatePolicy;
use lineproto_ingest::logging::env_filter;
use lineproto_ingest::{IngestConfig, LineIngestor};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

/// Decode InfluxDB line protocol, one line at a time, into JSON
#[derive(Parser)]
#[command(name = "lineproto-ingest")]
#[command(about = "Decode InfluxDB line protocol lines into JSON data points")]
#[command(version)]
struct Cli {
    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Configuration file (overrides CONFIG_PATH)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How duplicate keys within one set are handled
    #[arg(long, value_parser = ["reject", "last_write_wins"])]
    duplicate_policy: Option<String>,

    /// Stop at the first rejected line
    #[arg(long)]
    fail_fast: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries data only
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = IngestConfig::load_from_file(path)?;
            config.apply_overrides(|name| std::env::var(name).ok())?;
            config
        }
        None => IngestConfig::load()?,
    };

    if let Some(policy) = &cli.duplicate_policy {
        config.decoding.duplicate_policy = policy
            .parse::<DuplicatePolicy>()
            .map_err(anyhow::Error::msg)?;
    }
    if cli.fail_fast {
        config.ingestion.fail_fast = true;
    }
    if cli.pretty {
        config.output.pretty = true;
    }
    config.validate()?;
    info!("Loaded configuration: {:?}", config);

    let ingestor = LineIngestor::new(&config);
    let stdout = io::stdout().lock();

    let stats = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            ingestor.run(BufReader::new(file), stdout)?
        }
        None => ingestor.run(io::stdin().lock(), stdout)?,
    };

    if stats.rejected > 0 {
        info!("{} lines were rejected, see warnings above", stats.rejected);
    }

    Ok(())
}
