use crate::constants::{FEED_SOURCE, POSITIONAL_FIELDS};
use crate::pipeline::parse::ParsedRow;
use crate::pipeline::schema::SchemaVariant;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The single canonical record shape every feed variant is mapped onto.
///
/// All fields are present regardless of what the source variant supplied;
/// unmapped fields stay empty rather than failing the row. `ioc_id` is the
/// feed-assigned identifier and only the positional export carries one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalIocRecord {
    pub ioc_value: String,
    pub ioc_id: String,
    pub ioc_type: String,
    pub threat_type: String,
    pub malware_family_id: String,
    pub malware_alias: String,
    pub malware_printable: String,
    pub confidence_level: String,
    pub first_seen_utc: String,
    pub last_seen_utc: String,
    pub reference: String,
    pub tags: String,
    pub anonymous_flag: String,
    pub reporter: String,
    pub source: String,
    pub ingested_at: String,
}

impl CanonicalIocRecord {
    /// Column order of the output artifact. Fixed; downstream consumers
    /// depend on it.
    pub const FIELD_NAMES: [&'static str; 16] = [
        "ioc_value",
        "ioc_id",
        "ioc_type",
        "threat_type",
        "malware_family_id",
        "malware_alias",
        "malware_printable",
        "confidence_level",
        "first_seen_utc",
        "last_seen_utc",
        "reference",
        "tags",
        "anonymous_flag",
        "reporter",
        "source",
        "ingested_at",
    ];

    pub fn as_row(&self) -> [&str; 16] {
        [
            &self.ioc_value,
            &self.ioc_id,
            &self.ioc_type,
            &self.threat_type,
            &self.malware_family_id,
            &self.malware_alias,
            &self.malware_printable,
            &self.confidence_level,
            &self.first_seen_utc,
            &self.last_seen_utc,
            &self.reference,
            &self.tags,
            &self.anonymous_flag,
            &self.reporter,
            &self.source,
            &self.ingested_at,
        ]
    }

    /// Identity for batch-local deduplication: the feed-assigned id when the
    /// variant supplies one, otherwise the indicator itself.
    pub fn dedup_key(&self) -> &str {
        if self.ioc_id.is_empty() {
            &self.ioc_value
        } else {
            &self.ioc_id
        }
    }
}

/// Maps one parsed row onto the canonical shape and stamps the ingestion
/// time. Returns `None` when the row has no usable `ioc_value` — that can
/// only be judged after mapping, so the check lives here and not in the
/// parser.
pub fn normalize_row(
    row: &ParsedRow,
    variant: &SchemaVariant,
    ingested_at: DateTime<Utc>,
) -> Option<CanonicalIocRecord> {
    let fields = FieldLookup::new(row, variant);

    let ioc_value = fields.get(&["ioc_value", "ioc", "url"]);
    if ioc_value.is_empty() {
        debug!("Discarding row with empty ioc_value");
        return None;
    }

    Some(CanonicalIocRecord {
        ioc_value,
        ioc_id: fields.get(&["ioc_id"]),
        ioc_type: fields.get(&["ioc_type"]),
        threat_type: fields.get(&["threat_type"]),
        malware_family_id: fields.get(&["fk_malware", "malware"]),
        malware_alias: fields.get(&["malware_alias"]),
        malware_printable: fields.get(&["malware_printable"]),
        confidence_level: fields.get(&["confidence_level"]),
        first_seen_utc: fields.get(&["first_seen_utc", "first_seen"]),
        last_seen_utc: fields.get(&["last_seen_utc", "last_seen"]),
        reference: fields.get(&["reference"]),
        tags: fields.get(&["tags"]),
        anonymous_flag: fields.get(&["anonymous"]),
        reporter: fields.get(&["reporter"]),
        source: FEED_SOURCE.to_string(),
        ingested_at: ingested_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Name-to-cell resolution for one row under the active variant.
struct FieldLookup<'a> {
    row: &'a ParsedRow,
    variant: &'a SchemaVariant,
}

impl<'a> FieldLookup<'a> {
    fn new(row: &'a ParsedRow, variant: &'a SchemaVariant) -> Self {
        Self { row, variant }
    }

    /// Resolves the first of `names` the variant knows to a cell value.
    fn get(&self, names: &[&str]) -> String {
        names
            .iter()
            .find_map(|name| self.position(name))
            .and_then(|i| self.row.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        match self.variant {
            SchemaVariant::HeaderedNamed { columns } => {
                columns.iter().position(|c| c.eq_ignore_ascii_case(name))
            }
            SchemaVariant::PositionalFixed => POSITIONAL_FIELDS.iter().position(|&f| f == name),
        }
    }
}
