use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{GithubError, Result};

// ─── GET /user ────────────────────────────────────────────────────────────

/// The identity behind the presented token, from `GET /user`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthenticatedUser {
    pub login: String,
}

// ─── GET /repos/{owner}/{repo}/branches/{branch} ──────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
    #[serde(rename = "_links")]
    pub links: BranchLinks,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BranchCommit {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BranchLinks {
    #[serde(rename = "self")]
    pub self_url: String,
}

// ─── GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1 ────────────────

/// A (possibly truncated) recursive tree listing.
///
/// `truncated = true` means GitHub cut the listing short; the entries that
/// are present are valid, but the set is incomplete.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeResponse {
    pub sha: String,
    pub truncated: bool,
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    pub sha: String,
}

/// Entry kind in a git tree. `Commit` marks a submodule pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    Blob,
    Tree,
    Commit,
}

// ─── GET /repos/{owner}/{repo}/contents/{path} ────────────────────────────

/// A single file from the contents API. `content` is transport-encoded;
/// use [`ContentFile::decode_text`] to get at the text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentFile {
    pub path: String,
    pub sha: String,
    pub encoding: String,
    pub content: String,
}

impl ContentFile {
    /// Decode the transport payload into UTF-8 text.
    ///
    /// GitHub wraps base64 content with newlines; the decoder strips all
    /// whitespace first. Files the API refuses to inline (encoding "none")
    /// surface as [`GithubError::Encoding`].
    pub fn decode_text(&self) -> Result<String> {
        match self.encoding.as_str() {
            "base64" => {
                let cleaned: String = self
                    .content
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let bytes = BASE64.decode(cleaned.as_bytes())?;
                String::from_utf8(bytes).map_err(|source| GithubError::Utf8 {
                    path: self.path.clone(),
                    source,
                })
            }
            other => Err(GithubError::Encoding {
                encoding: other.to_string(),
                path: self.path.clone(),
            }),
        }
    }
}

// ─── PUT /repos/{owner}/{repo}/contents/{path} ────────────────────────────

/// Request body for a create-or-update file write.
///
/// `sha` carries the current blob sha when overwriting an existing file —
/// GitHub rejects the write with 409 otherwise. Leave it `None` to create.
#[derive(Debug, Clone, Serialize)]
pub struct NewFile {
    pub message: String,
    /// Base64-encoded file body.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl NewFile {
    /// Build a write request, base64-encoding `body`.
    pub fn from_bytes(message: impl Into<String>, body: &[u8], sha: Option<String>) -> Self {
        NewFile {
            message: message.into(),
            content: BASE64.encode(body),
            sha,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteResponse {
    pub content: Option<WrittenContent>,
    pub commit: WriteCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WrittenContent {
    pub path: String,
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteCommit {
    pub sha: String,
}

// ─── Tests ────────────────────────────────────────────────────────────────
