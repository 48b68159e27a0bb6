//! `github-client` — typed async client for the GitHub REST v3 API.
//!
//! Covers exactly the operations the `tagdex` pipeline consumes: identity
//! verification, branch resolution, recursive tree listing, contents
//! retrieval, and create-or-update file writes.
//!
//! # Architecture
//!
//! ```text
//! GithubClient    ← reqwest::Client with auth/user-agent/accept headers
//!     │              set once; base URL injectable for tests
//!     ▼
//! types.rs        ← serde DTOs for the consumed endpoints; no Value
//!     │              escape hatches
//!     ▼
//! GithubError     ← transport, non-2xx status, and content-decode failures
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use github_client::GithubClient;
//!
//! let client = GithubClient::new("ghp_…")?;
//! let user = client.authenticated_user().await?;
//! let branch = client.branch("octocat", "hello-world", "main").await?;
//! let tree = client.recursive_tree("octocat", "hello-world", &branch.commit.sha).await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::GithubClient;
pub use error::GithubError;
pub use types::{
    AuthenticatedUser, Branch, ContentFile, NewFile, TreeEntry, TreeEntryKind, TreeResponse,
    WriteResponse,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GithubError>;
