use crate::pipeline::schema::SchemaVariant;
use tracing::warn;

/// One data line split into trimmed cells, quote-aware.
pub type ParsedRow = Vec<String>;

/// Splits each data line into cells, dropping rows that are too short for
/// the active variant. Row-level defects are logged and skipped, never
/// fatal; the discard count is surfaced through the cycle result.
pub fn parse_rows(lines: &[String], variant: &SchemaVariant) -> (Vec<ParsedRow>, usize) {
    let min_columns = variant.min_columns();
    let mut rows = Vec::with_capacity(lines.len());
    let mut discarded = 0;

    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    for (i, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Discarding unparseable row {}: {}", i, e);
                discarded += 1;
                continue;
            }
        };

        let cells: ParsedRow = record.iter().map(|cell| cell.trim().to_string()).collect();
        if cells.len() < min_columns {
            warn!(
                "Discarding row {} with {} columns (minimum {} for {} schema)",
                i,
                cells.len(),
                min_columns,
                variant.name()
            );
            discarded += 1;
            continue;
        }

        rows.push(cells);
    }

    (rows, discarded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn headered() -> SchemaVariant {
        SchemaVariant::HeaderedNamed {
            columns: vec![
                "ioc".into(),
                "ioc_type".into(),
                "threat_type".into(),
                "malware".into(),
                "confidence_level".into(),
                "reference".into(),
                "first_seen".into(),
                "last_seen".into(),
            ],
        }
    }

    #[test]
    fn respects_quoted_delimiters() {
        let input = lines(&[
            "\"http://evil.example/a,b\",url,botnet_cc,win.lumma,75,ref,2025-01-01,2025-01-02",
        ]);
        let (rows, discarded) = parse_rows(&input, &headered());
        assert_eq!(discarded, 0);
        assert_eq!(rows[0][0], "http://evil.example/a,b");
        assert_eq!(rows[0].len(), 8);
    }

    #[test]
    fn trims_cell_whitespace() {
        let input = lines(&["  http://evil.example/ , url ,t,m,75,r,f,l"]);
        let (rows, _) = parse_rows(&input, &headered());
        assert_eq!(rows[0][0], "http://evil.example/");
        assert_eq!(rows[0][1], "url");
    }

    #[test]
    fn discards_rows_below_positional_minimum() {
        let input = lines(&[
            "a,b,c,d,e",
            "\"2025-01-01 00:00:01\",\"1\",\"http://evil.example/\",\"url\",\"botnet_cc\",\"7\",\"alias\",\"Lumma\",\"2025-01-02 00:00:01\",\"100\",\"ref\",\"tag\",\"0\",\"abuse_ch\"",
        ]);
        let (rows, discarded) = parse_rows(&input, &SchemaVariant::PositionalFixed);
        assert_eq!(rows.len(), 1);
        assert_eq!(discarded, 1);
        assert_eq!(rows[0][2], "http://evil.example/");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let (rows, discarded) = parse_rows(&[], &SchemaVariant::PositionalFixed);
        assert!(rows.is_empty());
        assert_eq!(discarded, 0);
    }
}
