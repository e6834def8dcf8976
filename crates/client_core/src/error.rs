use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderApiError {
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("order '{order_id}' not found")]
    NotFound { order_id: String },
    #[error("server responded with status {status}")]
    Server { status: u16, body: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl OrderApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Diagnostic body returned with a failed write, when the server sent one.
    pub fn server_body(&self) -> Option<&str> {
        match self {
            Self::Server {
                body: Some(body), ..
            } if !body.trim().is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OrderApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}
