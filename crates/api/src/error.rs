use std::fmt;

use thiserror::Error;

/// Error reported by the remote service itself, as opposed to a failure to
/// reach it. Only produced for `404` and `>= 500` responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub status_code: u16,
    /// Code plus canonical reason, e.g. `404 Not Found`; just the code when
    /// the status has no canonical reason.
    pub status: String,
    pub message: String,
}

impl RemoteError {
    pub fn not_found(status: impl Into<String>) -> Self {
        Self {
            status_code: 404,
            status: status.into(),
            message: "Not Found".to_string(),
        }
    }

    pub fn server(status_code: u16, status: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            status: status.into(),
            message: body.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for RemoteError {}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response format: missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("Invalid response format: field `{field}` is not {expected}")]
    UnexpectedShape {
        field: &'static str,
        expected: &'static str,
    },
}

impl ApiError {
    /// Status code of a structured remote error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Remote(remote) => Some(remote.status_code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ApiError::Json(_) | ApiError::MissingField { .. } | ApiError::UnexpectedShape { .. }
        )
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ApiError::InvalidUrl(_) => {
                Some("Use an absolute URL such as https://jira.example.com/rest/api/2/")
            }
            ApiError::RequestFailed(err) if err.is_connect() || err.is_timeout() => {
                Some("Check that the Jira host is reachable or raise the connect timeout")
            }
            ApiError::Remote(remote) if remote.status_code == 404 => {
                Some("Check that the issue or project key is correct")
            }
            ApiError::Remote(_) => {
                Some("The Jira server reported an internal error; try again later")
            }
            ApiError::MissingField { .. } | ApiError::UnexpectedShape { .. } => {
                Some("Verify your credentials; Jira answers some auth failures with non-JSON")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
