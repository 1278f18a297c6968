use reqwest::StatusCode;

/// Errors returned by gateway calls. None of them are fatal to the caller.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status this endpoint does not use for success.
    #[error("error: received status code {}, body: {body}", status.as_u16())]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status for [`GatewayError::Status`] errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
