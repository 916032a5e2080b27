use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One result row. Its shape depends on the query that produced it.
pub type Record = serde_json::Map<String, Value>;

/// Wrapped response returned by every backend query endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub count: usize,
    /// Field names present in each record. The backend sends this as `key`.
    #[serde(default, alias = "key")]
    pub keys: Vec<String>,
}

impl QueryResponse {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Field names to render and search, falling back to the first record's
    /// own fields when the backend sent none.
    pub fn field_names(&self) -> Vec<String> {
        if !self.keys.is_empty() {
            return self.keys.clone();
        }
        self.data
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// String form of a scalar field value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
