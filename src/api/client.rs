use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::backend::QueryBackend;
use crate::api::url::build_url;
use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};
use crate::model::{ParameterSet, QueryKind, QueryResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Everything about a request except where it goes
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get(query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Get,
            query,
            body: None,
        }
    }
}

/// Answer from the backend root
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// Thin HTTP wrapper around the query backend. Never retries; every
/// failure goes back to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("production-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConsoleError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        build_url(&self.base_url, path, query.iter().map(|(k, v)| (k, v)))
    }

    /// Issue one request and decode the JSON body.
    pub async fn call<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let url = self.url_for(path, &options.query)?;
        debug!("{:?} {}", options.method, url);

        let mut request = match options.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let res = request.send().await.map_err(map_reqwest_error)?;
        let status = res.status();
        let body = res.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            warn!("{} answered {}", path, status);
            return Err(ConsoleError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ConsoleError::Decode(e.to_string()))
    }

    /// Probe the backend root
    pub async fn health(&self) -> Result<HealthStatus> {
        self.call("/", RequestOptions::default()).await
    }
}

#[async_trait::async_trait]
impl QueryBackend for ApiClient {
    async fn fetch(&self, kind: QueryKind, params: &ParameterSet) -> Result<QueryResponse> {
        let descriptor = kind.descriptor();
        self.call(descriptor.path, RequestOptions::get(descriptor.query_pairs(params)))
            .await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ConsoleError {
    if e.is_timeout() {
        ConsoleError::Network("timeout".to_string())
    } else if e.is_connect() {
        ConsoleError::Network(format!("connection failed: {}", e))
    } else {
        ConsoleError::Network(e.to_string())
    }
}
