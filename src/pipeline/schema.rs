use crate::constants::{HEADER_MARKERS, MIN_COLUMNS_HEADERED, MIN_COLUMNS_POSITIONAL};
use tracing::info;

/// Closed set of feed layouts observed in the wild. Exactly one variant is
/// active per fetch cycle, and nothing is assumed about the next cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Header row present; fields are addressed by the names it declares.
    HeaderedNamed { columns: Vec<String> },
    /// No header; fields are addressed by index against the fixed 14-column
    /// layout in [`crate::constants::POSITIONAL_FIELDS`].
    PositionalFixed,
}

impl SchemaVariant {
    /// Rows with fewer cells than this are discarded before normalization.
    pub fn min_columns(&self) -> usize {
        match self {
            SchemaVariant::HeaderedNamed { .. } => MIN_COLUMNS_HEADERED,
            SchemaVariant::PositionalFixed => MIN_COLUMNS_POSITIONAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaVariant::HeaderedNamed { .. } => "headered",
            SchemaVariant::PositionalFixed => "positional",
        }
    }
}

/// Classifies the sanitized lines and splits off the header when one exists.
///
/// The first line is read as a CSV record; if any cell matches a recognized
/// IOC column name the feed is headered and that line is consumed. Anything
/// else, including a first line that fails to parse at all, is treated as
/// positional data. Misclassifying here would silently shift every field
/// mapping, so the decision is made on line content only, never on config.
pub fn detect(lines: Vec<String>) -> (SchemaVariant, Vec<String>) {
    if lines.is_empty() {
        return (SchemaVariant::PositionalFixed, lines);
    }

    if let Some(columns) = header_columns(&lines[0]) {
        info!("Detected headered feed with {} columns", columns.len());
        let data = lines.into_iter().skip(1).collect();
        return (SchemaVariant::HeaderedNamed { columns }, data);
    }

    info!("No header row detected, treating feed as positional");
    (SchemaVariant::PositionalFixed, lines)
}

fn header_columns(line: &str) -> Option<Vec<String>> {
    let cells = split_line(line)?;
    let looks_like_header = cells
        .iter()
        .any(|cell| HEADER_MARKERS.contains(&cell.to_ascii_lowercase().as_str()));
    looks_like_header.then_some(cells)
}

fn split_line(line: &str) -> Option<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = reader.records().next()?.ok()?;
    Some(record.iter().map(|cell| cell.trim().to_string()).collect())
}
