use crate::pipeline::normalize::CanonicalIocRecord;
use std::collections::HashSet;
use tracing::debug;

/// Collapses records sharing a dedup key, first occurrence wins.
///
/// The feed emits newest entries first, so keeping the earliest duplicate
/// keeps the freshest one without comparing timestamps. Survivors stay in
/// feed order. Returns the survivors and the number of dropped duplicates.
pub fn dedupe_records(records: Vec<CanonicalIocRecord>) -> (Vec<CanonicalIocRecord>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    let mut dropped = 0;

    for record in records {
        if seen.insert(record.dedup_key().to_string()) {
            unique.push(record);
        } else {
            debug!("Dropping duplicate record for key {}", record.dedup_key());
            dropped += 1;
        }
    }

    (unique, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ioc_id: &str, ioc_value: &str, last_seen: &str) -> CanonicalIocRecord {
        CanonicalIocRecord {
            ioc_value: ioc_value.to_string(),
            ioc_id: ioc_id.to_string(),
            ioc_type: "url".to_string(),
            threat_type: String::new(),
            malware_family_id: String::new(),
            malware_alias: String::new(),
            malware_printable: String::new(),
            confidence_level: String::new(),
            first_seen_utc: String::new(),
            last_seen_utc: last_seen.to_string(),
            reference: String::new(),
            tags: String::new(),
            anonymous_flag: String::new(),
            reporter: String::new(),
            source: "ThreatFox".to_string(),
            ingested_at: String::new(),
        }
    }

    #[test]
    fn first_occurrence_wins_on_ioc_id() {
        let records = vec![
            record("123", "http://a.example/", "2025-01-05"),
            record("123", "http://a.example/", "2025-01-01"),
        ];
        let (unique, dropped) = dedupe_records(records);
        assert_eq!(unique.len(), 1);
        assert_eq!(dropped, 1);
        assert_eq!(unique[0].last_seen_utc, "2025-01-05");
    }

    #[test]
    fn falls_back_to_ioc_value_without_feed_id() {
        let records = vec![
            record("", "http://a.example/", "x"),
            record("", "http://a.example/", "y"),
            record("", "http://b.example/", "z"),
        ];
        let (unique, dropped) = dedupe_records(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(unique[0].last_seen_utc, "x");
    }

    #[test]
    fn distinct_ids_with_same_value_both_survive() {
        // The feed id is the stronger identity when present.
        let records = vec![
            record("1", "http://same.example/", "x"),
            record("2", "http://same.example/", "y"),
        ];
        let (unique, dropped) = dedupe_records(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn preserves_feed_order() {
        let records = vec![
            record("3", "http://c.example/", ""),
            record("1", "http://a.example/", ""),
            record("2", "http://b.example/", ""),
        ];
        let (unique, _) = dedupe_records(records);
        let ids: Vec<&str> = unique.iter().map(|r| r.ioc_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
