use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;

use threatfox_crawler::config::FeedConfig;
use threatfox_crawler::error::Result;
use threatfox_crawler::logging;
use threatfox_crawler::pipeline::{self, CycleResult};

#[derive(Parser)]
#[command(name = "threatfox_crawler")]
#[command(about = "ThreatFox URL IOC feed crawler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the live feed and run the full ingestion cycle
    Fetch {
        /// Override the feed URL from config
        #[arg(long)]
        url: Option<String>,
    },
    /// Run the ingestion cycle over a previously saved feed snapshot
    Parse {
        /// Path to the snapshot file
        file: String,
    },
}

fn load_config(cli: &Cli) -> Result<FeedConfig> {
    match &cli.config {
        Some(path) => FeedConfig::load(path),
        None => FeedConfig::load_or_default(),
    }
}

fn print_summary(result: &CycleResult) {
    if result.records_written == 0 {
        println!("[!] No IOCs collected");
        return;
    }
    println!(
        "[+] Saved {} URL IOCs -> {}",
        result.records_written,
        result.output_file.as_deref().unwrap_or("-")
    );
    println!("    Schema: {}", result.schema);
    println!("    Data lines: {}", result.total_lines);
    println!("    Discarded rows: {}", result.discarded_rows);
    println!("    Duplicates dropped: {}", result.duplicate_rows);
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    let result = match cli.command {
        Commands::Fetch { url } => {
            if let Some(url) = url {
                config.feed_url = url;
            }
            println!("[*] Fetching ThreatFox URL IOCs...");
            pipeline::run_cycle(&config).await?
        }
        Commands::Parse { file } => {
            println!("[*] Parsing snapshot {file}...");
            let raw = std::fs::read_to_string(&file)?;
            pipeline::ingest_text(&raw, &config)?
        }
    };

    print_summary(&result);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Feed cycle failed: {}", e);
            eprintln!("[!] Feed cycle failed: {e}");
            ExitCode::FAILURE
        }
    }
}
