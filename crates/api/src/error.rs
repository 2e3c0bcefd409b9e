use crate::endpoint::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    Transport { endpoint: Endpoint, message: String },
    /// Non-2xx response without a usable body.
    Status { endpoint: Endpoint, status: u16 },
    /// The body did not match the endpoint's payload shape.
    Parse { endpoint: Endpoint, message: String },
    /// The backend answered with an `{"error": ...}` payload.
    Backend { endpoint: Endpoint, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport { endpoint, message } => {
                write!(f, "request to {endpoint} failed: {message}")
            }
            ApiError::Status { endpoint, status } => {
                write!(f, "{endpoint} answered HTTP {status}")
            }
            ApiError::Parse { endpoint, message } => {
                write!(f, "unexpected payload from {endpoint}: {message}")
            }
            ApiError::Backend { endpoint, message } => {
                write!(f, "{endpoint} reported: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
