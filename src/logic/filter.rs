use crate::model::{display_value, Record};

/// Case-insensitive substring match over the given keys of one record.
/// Blank search text matches everything.
pub fn matches(record: &Record, keys: &[String], term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    keys.iter()
        .filter_map(|key| record.get(key))
        .any(|value| display_value(value).to_lowercase().contains(&needle))
}

/// Records matching `term`, in their original order. A linear scan; result
/// sets are small.
pub fn filter_records<'a>(records: &'a [Record], keys: &[String], term: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| matches(record, keys, term))
        .collect()
}
