use serde::Deserialize;
use wayfare_core::api::ApiError;

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never got an answer (connect, DNS, TLS, body stream).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the body's `message` field if it had one.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL {0}")]
    BaseUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ClientError {
    /// Build a status error from a raw error body, keeping only `message`.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ClientError::Status { status, message }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } => ApiError::status(status, message),
            // No usable server message either way; callers show their fallback
            ClientError::Request(e) => ApiError::transport(e.to_string()),
            ClientError::Decode(e) => ApiError::transport(format!("unreadable response: {}", e)),
            ClientError::BaseUrl(base) => ApiError::transport(format!("invalid base URL {}", base)),
        }
    }
}
