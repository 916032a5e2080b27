use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value as reported by a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Blank text, an empty list, or a list of blanks
    pub fn is_blank(&self) -> bool {
        match self {
            ParamValue::Number(_) => false,
            ParamValue::Text(text) => text.trim().is_empty(),
            ParamValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }

    /// String forms sent on the wire; lists yield one entry per item.
    pub fn wire_values(&self) -> Vec<String> {
        match self {
            ParamValue::Number(n) => vec![n.to_string()],
            ParamValue::Text(text) => vec![text.clone()],
            ParamValue::List(items) => items.clone(),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

/// Named parameter bag produced by a form.
///
/// The consumer never merges two sets; every report replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Every value present is non-blank
    pub fn is_complete(&self) -> bool {
        self.0.values().all(|value| !value.is_blank())
    }

    /// Names mapped to wire strings, list values repeated under the same name.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .flat_map(|(name, value)| {
                value
                    .wire_values()
                    .into_iter()
                    .map(move |v| (name.to_string(), v))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_make_set_incomplete() {
        let set = ParameterSet::new()
            .with("start_dt", "2024-02-10T09:00")
            .with("end_dt", "");
        assert!(!set.is_complete());

        let set = set.with("end_dt", "2024-02-10T12:00");
        assert!(set.is_complete());
    }

    #[test]
    fn test_list_of_blanks_is_blank() {
        assert!(ParamValue::List(vec![" ".to_string()]).is_blank());
        assert!(ParamValue::List(Vec::new()).is_blank());
        assert!(!ParamValue::List(vec!["Actor".to_string()]).is_blank());
        assert!(!ParamValue::Number(0).is_blank());
    }

    #[test]
    fn test_query_pairs_repeat_list_values() {
        let set = ParameterSet::new()
            .with("personnel_types", vec!["Actor".to_string(), "Crew".to_string()])
            .with("limit", 5i64);
        assert_eq!(
            set.query_pairs(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("personnel_types".to_string(), "Actor".to_string()),
                ("personnel_types".to_string(), "Crew".to_string()),
            ]
        );
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let set = ParameterSet::new().with("n", 3i64).with("name", "Alice");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"n": 3, "name": "Alice"}));
    }
}
