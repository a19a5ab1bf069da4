use serde::Deserialize;
use thiserror::Error;

/// Failure of a call to the auth or user service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Local form validation failure, shown before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Enter a valid email address")]
    InvalidEmail,
}

/// FastAPI error body: `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationItem>),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    msg: String,
}

/// Extract the `detail` text from an error body, if it has one.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let text = match parsed.detail {
        Detail::Message(message) => message,
        Detail::Validation(items) => items
            .into_iter()
            .map(|item| item.msg)
            .collect::<Vec<_>>()
            .join("; "),
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = extract_detail(body).unwrap_or_default();
        match status {
            401 => Self::Auth(detail),
            404 => Self::NotFound(detail),
            400 | 409 | 422 => Self::Validation(detail),
            _ => Self::Server { status, detail },
        }
    }

    /// The server supplied detail, when there is one.
    pub fn detail(&self) -> Option<&str> {
        let detail = match self {
            Self::Auth(detail) | Self::NotFound(detail) | Self::Validation(detail) => detail,
            Self::Server { detail, .. } => detail,
            Self::Network(_) | Self::Decode(_) => return None,
        };
        (!detail.is_empty()).then_some(detail.as_str())
    }

    /// Text shown to the user: the server detail, else `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }
}
