/// Constant literal stamped into every record's `source` field.
pub const FEED_SOURCE: &str = "ThreatFox";

/// Recent URL IOC export, refreshed by abuse.ch on a rolling window.
pub const DEFAULT_FEED_URL: &str = "https://threatfox.abuse.ch/export/csv/urls/recent/";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_USER_AGENT: &str = "ThreatIntel-Crawler/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Field order of the headerless export variant. The feed does not document
/// this; the order was taken from observed exports and must not be reordered.
pub const POSITIONAL_FIELDS: [&str; 14] = [
    "first_seen_utc",
    "ioc_id",
    "ioc_value",
    "ioc_type",
    "threat_type",
    "fk_malware",
    "malware_alias",
    "malware_printable",
    "last_seen_utc",
    "confidence_level",
    "reference",
    "tags",
    "anonymous",
    "reporter",
];

/// Minimum cell count before a row is considered usable, per variant.
pub const MIN_COLUMNS_HEADERED: usize = 8;
pub const MIN_COLUMNS_POSITIONAL: usize = POSITIONAL_FIELDS.len();

/// Header cell names that identify a first line as a real header row.
/// Deliberately excludes `url`: positional data rows carry a literal `url`
/// cell in their ioc_type column, which would misclassify the whole feed.
pub const HEADER_MARKERS: [&str; 2] = ["ioc", "ioc_value"];
