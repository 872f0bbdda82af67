//! Line codec for the persisted history blob.
//!
//! One record per line, fields comma-joined in this fixed order:
//! `timestamp_millis,category,weight_carat,quality,purity,currency,estimated_value,per_carat`.
//! New records are written at the front of the blob, but readers always
//! re-sort by timestamp, newest first.

use crate::models::HistoryEntry;
use tracing::debug;

pub const FIELD_COUNT: usize = 8;

pub fn encode(entry: &HistoryEntry) -> String {
    [
        entry.timestamp_millis.to_string(),
        entry.category_label.replace(',', " "),
        entry.weight_carat.to_string(),
        entry.quality.clone(),
        entry.purity.clone(),
        entry.currency.clone(),
        entry.estimated_value.to_string(),
        entry.per_carat.to_string(),
    ]
    .join(",")
}

/// `None` for lines with fewer than eight fields or an unparseable number.
/// Fields past the eighth are ignored.
pub fn decode(line: &str) -> Option<HistoryEntry> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < FIELD_COUNT {
        return None;
    }
    Some(HistoryEntry {
        timestamp_millis: parts[0].parse().ok()?,
        category_label: parts[1].to_string(),
        weight_carat: parts[2].parse().ok()?,
        quality: parts[3].to_string(),
        purity: parts[4].to_string(),
        currency: parts[5].to_string(),
        estimated_value: parts[6].parse().ok()?,
        per_carat: parts[7].parse().ok()?,
    })
}

pub fn append(entry: &HistoryEntry, blob: &str) -> String {
    let line = encode(entry);
    if blob.trim().is_empty() {
        line
    } else {
        format!("{line}\n{blob}")
    }
}

/// Decodes every well-formed line, newest first. Malformed lines are dropped.
pub fn load(blob: &str) -> Vec<HistoryEntry> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    let mut entries: Vec<HistoryEntry> = blob
        .lines()
        .filter_map(|line| {
            let decoded = decode(line);
            if decoded.is_none() && !line.trim().is_empty() {
                debug!(line, "dropping malformed history record");
            }
            decoded
        })
        .collect();
    entries.sort_by(|a, b| b.timestamp_millis.cmp(&a.timestamp_millis));
    entries
}

pub fn clear() -> String {
    String::new()
}
