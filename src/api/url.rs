use log::debug;
use reqwest::Url;

use crate::error::{ConsoleError, Result};

/// Join base address and route, then append the URL-encoded pairs.
/// No pairs means no query string at all (not a bare `?`).
pub fn build_url<I, K, V>(base: &str, path: &str, pairs: I) -> Result<Url>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let joined = format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|e| ConsoleError::Network(format!("invalid request url {}: {}", joined, e)))?;

    let mut pairs = pairs.into_iter().peekable();
    if pairs.peek().is_some() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    debug!("built url {}", url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterSet;
    use std::collections::HashMap;

    #[test]
    fn test_query_string_decodes_back_to_inputs() {
        let params = ParameterSet::new().with("a", 1i64).with("b", "two");
        let url = build_url("http://localhost:2300", "/x", params.query_pairs()).unwrap();

        assert_eq!(url.path(), "/x");
        let decoded: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["a"], "1");
        assert_eq!(decoded["b"], "two");
    }

    #[test]
    fn test_no_pairs_means_no_query_string() {
        let url = build_url(
            "http://localhost:2300/",
            "/stats/production/expenses/summary",
            Vec::<(String, String)>::new(),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:2300/stats/production/expenses/summary"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let url = build_url(
            "http://localhost:2300",
            "/stats/partners/for-performer",
            [("performer_name", "Alice Kim & Co")],
        )
        .unwrap();
        let (name, value) = url.query_pairs().next().unwrap();
        assert_eq!(name, "performer_name");
        assert_eq!(value, "Alice Kim & Co");
        assert!(!url.query().unwrap().contains(' '));
    }

    #[test]
    fn test_invalid_base_is_reported() {
        let err = build_url("not a url", "/x", [("a", "1")]).unwrap_err();
        assert!(matches!(err, ConsoleError::Network(_)));
    }
}
