use thiserror::Error;

/// Every failure the console can surface.
///
/// Remote failures (`Network`, `Http`, `Decode`) are caught at the submission
/// boundary and turned into a single alert. `Validation` only ever suppresses
/// a submission. `UnknownQuery` can only come from textual ids typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("API Error: {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("unknown query: {0}")]
    UnknownQuery(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl ConsoleError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for failures that came back from (or on the way to) the backend.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. } | Self::Decode(_))
    }
}

pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;
