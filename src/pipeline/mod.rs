pub mod dedupe;
pub mod normalize;
pub mod parse;
pub mod sanitize;
pub mod schema;
pub mod sink;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::fetch;
use crate::pipeline::sink::SinkOutcome;
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Counters from one complete fetch cycle.
#[derive(Debug, Serialize)]
pub struct CycleResult {
    pub schema: &'static str,
    pub total_lines: usize,
    pub parsed_rows: usize,
    pub discarded_rows: usize,
    pub duplicate_rows: usize,
    pub records_written: usize,
    /// `None` when nothing survived and no artifact was touched.
    pub output_file: Option<String>,
}

/// Runs one full fetch → sanitize → parse → normalize → dedupe → write
/// cycle. Transport failure aborts before anything is written; row-level
/// defects are dropped and counted.
#[instrument(skip(config), fields(feed_url = %config.feed_url))]
pub async fn run_cycle(config: &FeedConfig) -> Result<CycleResult> {
    let raw = fetch::fetch_feed(config).await?;
    ingest_text(&raw, config)
}

/// The synchronous tail of the cycle, shared by `run_cycle` and offline
/// snapshot runs. Each invocation is independent; nothing carries over.
pub fn ingest_text(raw: &str, config: &FeedConfig) -> Result<CycleResult> {
    let lines = sanitize::sanitize_feed(raw);
    let total_lines = lines.len();
    info!("Sanitized feed down to {} data lines", total_lines);

    let (variant, data_lines) = schema::detect(lines);

    let (rows, mut discarded) = parse::parse_rows(&data_lines, &variant);

    let ingested_at = Utc::now();
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        match normalize::normalize_row(row, &variant, ingested_at) {
            Some(record) => records.push(record),
            None => discarded += 1,
        }
    }

    let (unique, duplicates) = dedupe::dedupe_records(records);
    info!(
        "Normalized {} records ({} discarded, {} duplicates dropped)",
        unique.len(),
        discarded,
        duplicates
    );
    if discarded > 0 {
        warn!("{} rows discarded during this cycle", discarded);
    }

    let path = output_path(config);
    let outcome = sink::write_records(&unique, &path)?;
    let (records_written, output_file) = match outcome {
        SinkOutcome::Written(count) => (count, Some(path.to_string_lossy().to_string())),
        SinkOutcome::NothingToPersist => (0, None),
    };

    Ok(CycleResult {
        schema: variant.name(),
        total_lines,
        parsed_rows: rows.len(),
        discarded_rows: discarded,
        duplicate_rows: duplicates,
        records_written,
        output_file,
    })
}

/// Dated artifact path; a same-day re-run rewrites the same file.
fn output_path(config: &FeedConfig) -> PathBuf {
    let filename = format!("threatfox_urls_{}.csv", Utc::now().format("%Y%m%d"));
    PathBuf::from(&config.output_dir).join(filename)
}
