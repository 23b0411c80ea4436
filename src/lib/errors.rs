use thiserror::Error;

/// Every failure a flow can surface. None of them is fatal to the application;
/// each one maps to a visible message or a redirect.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Malformed local input, rejected before any request is sent.
    #[error("{0}")]
    Validation(String),
    /// The backend answered with a non-success status; `message` holds the
    /// flattened field errors, possibly empty.
    #[error("Request failed ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// 401/403 on a bearer-authenticated call.
    #[error("Session is no longer valid ({status})")]
    Unauthorized { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    /// Text to show the user: validation messages and backend-provided error text
    /// verbatim, `fallback` for everything else.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(message) => message.clone(),
            AppError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
