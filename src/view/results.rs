use itertools::Itertools;

use crate::model::{display_value, Record};

pub const EMPTY_TITLE: &str = "Information not found";
pub const EMPTY_HINT: &str = "No results match your search";

/// `key: value` lines in key order, which is what the clipboard receives.
pub fn format_record(record: &Record, keys: &[String]) -> String {
    keys.iter()
        .filter_map(|key| record.get(key).map(|value| (key, value)))
        .map(|(key, value)| format!("{}: {}", key, display_value(value)))
        .join("\n")
}

/// Result list with a transient per-record "copied" marker.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    copied: Option<usize>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index into the displayed list currently marked as copied
    pub fn copied(&self) -> Option<usize> {
        self.copied
    }

    pub fn mark_copied(&mut self, index: usize) {
        self.copied = Some(index);
    }

    pub fn clear_copied(&mut self) {
        self.copied = None;
    }

    pub fn render(&self, records: &[&Record], keys: &[String]) -> String {
        if records.is_empty() {
            return format!("  {}\n  {}", EMPTY_TITLE, EMPTY_HINT);
        }

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let marker = if self.copied == Some(index) { "Copied!" } else { "Copy" };
                let body = format_record(record, keys)
                    .lines()
                    .map(|line| format!("     {}", line))
                    .join("\n");
                format!("[{}] ({})\n{}", index + 1, marker, body)
            })
            .join("\n\n")
    }
}
