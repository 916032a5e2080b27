use log::warn;

use crate::config::StalePolicy;
use crate::logic::filter_records;
use crate::model::{QueryResponse, Record};

/// Results owned by the page root: the last applied envelope plus the
/// current search term. The displayed list is always derived from both and
/// the envelope is never modified by filtering.
#[derive(Debug, Clone)]
pub struct ResultsSession {
    policy: StalePolicy,
    issued: u64,
    response: Option<QueryResponse>,
    search: String,
}

impl ResultsSession {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            issued: 0,
            response: None,
            search: String::new(),
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Tag for the next request
    pub fn next_sequence(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Make every request issued so far stale, e.g. when the user picks
    /// another query while one is still in flight.
    pub fn invalidate(&mut self) {
        if self.policy == StalePolicy::LatestRequested {
            self.issued += 1;
        }
    }

    /// Whether an answer to `sequence` should still reach the user
    pub fn is_current(&self, sequence: u64) -> bool {
        match self.policy {
            StalePolicy::LatestRequested => sequence >= self.issued,
            StalePolicy::LastArrived => true,
        }
    }

    /// Store a response unless it answers a superseded request.
    pub fn apply(&mut self, sequence: u64, response: QueryResponse) -> bool {
        if !self.is_current(sequence) {
            warn!(
                "discarding response #{}, request #{} is newer",
                sequence, self.issued
            );
            return false;
        }
        self.response = Some(response);
        true
    }

    pub fn response(&self) -> Option<&QueryResponse> {
        self.response.as_ref()
    }

    pub fn keys(&self) -> Vec<String> {
        self.response
            .as_ref()
            .map(QueryResponse::field_names)
            .unwrap_or_default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn displayed(&self) -> Vec<&Record> {
        match &self.response {
            Some(response) => filter_records(&response.data, &response.field_names(), &self.search),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(names: &[&str]) -> QueryResponse {
        let data: Vec<_> = names.iter().map(|name| json!({"name": name})).collect();
        serde_json::from_value(json!({"data": data, "count": names.len(), "key": ["name"]})).unwrap()
    }

    #[test]
    fn test_older_response_is_discarded() {
        let mut session = ResultsSession::new(StalePolicy::LatestRequested);
        let first = session.next_sequence();
        let second = session.next_sequence();

        assert!(session.apply(second, response(&["new"])));
        assert!(!session.apply(first, response(&["old"])));
        assert_eq!(session.response().unwrap().data[0]["name"], "new");
    }

    #[test]
    fn test_last_arrived_policy_keeps_inherited_order() {
        let mut session = ResultsSession::new(StalePolicy::LastArrived);
        let first = session.next_sequence();
        let second = session.next_sequence();

        assert!(session.apply(second, response(&["new"])));
        assert!(session.apply(first, response(&["old"])));
        assert_eq!(session.response().unwrap().data[0]["name"], "old");
    }

    #[test]
    fn test_invalidate_drops_in_flight_answers() {
        let mut session = ResultsSession::new(StalePolicy::LatestRequested);
        let sequence = session.next_sequence();
        session.invalidate();
        assert!(!session.is_current(sequence));
        assert!(session.response().is_none());
    }

    #[test]
    fn test_displayed_is_derived_from_search() {
        let mut session = ResultsSession::new(StalePolicy::LatestRequested);
        let sequence = session.next_sequence();
        session.apply(sequence, response(&["Alice", "Bruno", "Alina"]));

        session.set_search("ALI");
        assert_eq!(session.displayed().len(), 2);
        assert_eq!(session.response().unwrap().data.len(), 3);

        session.set_search("");
        assert_eq!(session.displayed().len(), 3);
    }
}
