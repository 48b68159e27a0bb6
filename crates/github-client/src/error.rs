use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    #[error("invalid credential: cannot be used as an Authorization header")]
    Credential(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to decode base64 content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("content at {path} is not valid UTF-8")]
    Utf8 {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("unsupported content encoding '{encoding}' for {path}")]
    Encoding { encoding: String, path: String },
}

impl GithubError {
    /// `true` when the API answered 404 — callers use this to distinguish
    /// "file does not exist yet" from real failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GithubError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}
