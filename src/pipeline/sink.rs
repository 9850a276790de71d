use crate::error::Result;
use crate::pipeline::normalize::CanonicalIocRecord;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::info;

/// What the sink did with the batch.
#[derive(Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Artifact rewritten with this many records.
    Written(usize),
    /// Empty batch; no file was created or touched.
    NothingToPersist,
}

/// Serializes the deduplicated batch to the output artifact.
///
/// The whole artifact is rendered into memory before anything touches the
/// filesystem, and committed with a single write, so a serialization failure
/// mid-batch can never leave a truncated file behind. Every field is quoted
/// to tolerate embedded delimiters; the header follows the fixed canonical
/// column order.
pub fn write_records(records: &[CanonicalIocRecord], output_path: &Path) -> Result<SinkOutcome> {
    if records.is_empty() {
        info!("No records to persist, skipping write");
        return Ok(SinkOutcome::NothingToPersist);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CanonicalIocRecord::FIELD_NAMES)?;
    for record in records {
        writer.write_record(record.as_row())?;
    }

    let buffer = writer.into_inner().map_err(|e| e.into_error())?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, buffer)?;

    info!("Saved {} records to {}", records.len(), output_path.display());
    Ok(SinkOutcome::Written(records.len()))
}
