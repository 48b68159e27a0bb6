use github_client::GithubError;
use thiserror::Error;

/// Pipeline-level failures. All of these abort the run; per-document fetch
/// and parse problems are logged and isolated instead (see `pipeline`).
#[derive(Debug, Error)]
pub enum TagdexError {
    #[error("credential verification failed")]
    Auth(#[source] GithubError),

    #[error("failed to resolve branch '{branch}' of {owner}/{repo}")]
    Resolution {
        owner: String,
        repo: String,
        branch: String,
        #[source]
        source: GithubError,
    },

    #[error("failed to list tree {sha} of {owner}/{repo}")]
    Listing {
        owner: String,
        repo: String,
        sha: String,
        #[source]
        source: GithubError,
    },

    #[error("tree {sha} of {owner}/{repo} is truncated: paging is not supported")]
    TruncatedListing {
        owner: String,
        repo: String,
        sha: String,
    },

    #[error("failed to publish tag index to {owner}/{repo}/{path}")]
    Publish {
        owner: String,
        repo: String,
        path: String,
        #[source]
        source: GithubError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TagdexError>;
