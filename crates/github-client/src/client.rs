use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::types::{
    AuthenticatedUser, Branch, ContentFile, NewFile, TreeResponse, WriteResponse,
};
use crate::{GithubError, Result};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const AGENT: &str = concat!("tagdex/", env!("CARGO_PKG_VERSION"));

// ─── GithubClient ─────────────────────────────────────────────────────────

/// Authenticated GitHub REST v3 client.
///
/// Credentials and protocol headers are installed as reqwest default headers
/// at construction, so every request carries them. The base URL defaults to
/// the public API and is injectable for tests and GitHub Enterprise hosts.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client presenting `token` against the public GitHub API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Build a client against an explicit API root (no trailing slash).
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(GithubClient {
            http,
            base_url: base_url.into(),
        })
    }

    // ─── Read API ─────────────────────────────────────────────────────────

    /// `GET /user` — resolve the identity behind the token. Used to verify
    /// the credential before any repository work.
    pub async fn authenticated_user(&self) -> Result<AuthenticatedUser> {
        self.get_json("/user".to_string()).await
    }

    /// `GET /repos/{owner}/{repo}/branches/{branch}` — resolve a branch to
    /// its head commit sha and self link.
    pub async fn branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        self.get_json(format!("/repos/{owner}/{repo}/branches/{branch}"))
            .await
    }

    /// `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1` — the full
    /// file tree under a commit. Callers must check `truncated`.
    pub async fn recursive_tree(&self, owner: &str, repo: &str, sha: &str) -> Result<TreeResponse> {
        self.get_json(format!("/repos/{owner}/{repo}/git/trees/{sha}?recursive=1"))
            .await
    }

    /// `GET /repos/{owner}/{repo}/contents/{path}` — a single file with its
    /// transport-encoded content and current blob sha.
    pub async fn contents(&self, owner: &str, repo: &str, path: &str) -> Result<ContentFile> {
        self.get_json(format!("/repos/{owner}/{repo}/contents/{path}"))
            .await
    }

    /// Fetch a file and decode it to UTF-8 text.
    pub async fn fetch_text(&self, owner: &str, repo: &str, path: &str) -> Result<String> {
        self.contents(owner, repo, path).await?.decode_text()
    }

    // ─── Write API ────────────────────────────────────────────────────────

    /// `PUT /repos/{owner}/{repo}/contents/{path}` — create a file, or
    /// update it when `file.sha` carries the current blob sha.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        file: &NewFile,
    ) -> Result<WriteResponse> {
        let route = format!("/repos/{owner}/{repo}/contents/{path}");
        let response = self
            .http
            .put(format!("{}{route}", self.base_url))
            .json(file)
            .send()
            .await?;
        self.read_json(route, response).await
    }

    // ─── Internals ────────────────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, route: String) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{route}", self.base_url))
            .send()
            .await?;
        self.read_json(route, response).await
    }

    async fn read_json<T: DeserializeOwned>(&self, route: String, response: Response) -> Result<T> {
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!(remaining, route = %route, "GitHub rate limit");
        }

        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                path: route,
            });
        }
        Ok(response.json().await?)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreeEntryKind;
    use mockito::Matcher;

    async fn client(server: &mockito::ServerGuard) -> GithubClient {
        GithubClient::with_base_url("t0ken", server.url()).unwrap()
    }

    #[tokio::test]
    async fn authenticated_user_sends_token_and_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "token t0ken")
            .match_header("user-agent", Matcher::Regex("^tagdex/".into()))
            .with_body(r#"{"login":"octocat"}"#)
            .create_async()
            .await;

        let user = client(&server).await.authenticated_user().await.unwrap();
        assert_eq!(user.login, "octocat");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bad_credential_surfaces_as_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials"}"#)
            .create_async()
            .await;

        let err = client(&server).await.authenticated_user().await.unwrap_err();
        match err {
            GithubError::Status { status, path } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(path, "/user");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn branch_resolves_sha_and_self_link() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/o/r/branches/main")
            .with_body(
                r#"{
                    "name": "main",
                    "commit": {"sha": "abc123"},
                    "_links": {"self": "https://api.github.com/repos/o/r/branches/main"}
                }"#,
            )
            .create_async()
            .await;

        let branch = client(&server).await.branch("o", "r", "main").await.unwrap();
        assert_eq!(branch.commit.sha, "abc123");
    }

    #[tokio::test]
    async fn recursive_tree_parses_entries_and_truncation_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/o/r/git/trees/abc123?recursive=1")
            .with_body(
                r#"{
                    "sha": "abc123",
                    "truncated": false,
                    "tree": [
                        {"path": "README.md", "type": "blob", "sha": "b1"},
                        {"path": "docs", "type": "tree", "sha": "t1"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let tree = client(&server)
            .await
            .recursive_tree("o", "r", "abc123")
            .await
            .unwrap();
        assert!(!tree.truncated);
        assert_eq!(tree.tree.len(), 2);
        assert_eq!(tree.tree[0].kind, TreeEntryKind::Blob);
        assert_eq!(tree.tree[1].kind, TreeEntryKind::Tree);
    }

    #[tokio::test]
    async fn fetch_text_decodes_wrapped_base64() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/o/r/contents/docs/a.md")
            .with_body(
                // "hello world" split across two base64 lines, as GitHub does
                r#"{
                    "path": "docs/a.md",
                    "sha": "b1",
                    "encoding": "base64",
                    "content": "aGVsbG8g\nd29ybGQ=\n"
                }"#,
            )
            .create_async()
            .await;

        let text = client(&server)
            .await
            .fetch_text("o", "r", "docs/a.md")
            .await
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn missing_file_is_detectable_as_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/o/r/contents/absent.json")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .await
            .contents("o", "r", "absent.json")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_or_update_sends_sha_only_when_updating() {
        let mut server = mockito::Server::new_async().await;
        // Exact body match: proves no `sha` key is sent on create
        let create = server
            .mock("PUT", "/repos/o/r/contents/tags.json")
            .match_body(Matcher::Json(
                serde_json::json!({"message": "created", "content": "e30="}),
            ))
            .with_body(
                r#"{
                    "content": {"path": "tags.json", "sha": "new1"},
                    "commit": {"sha": "c1"}
                }"#,
            )
            .create_async()
            .await;

        let response = client(&server)
            .await
            .create_or_update_file(
                "o",
                "r",
                "tags.json",
                &NewFile::from_bytes("created", b"{}", None),
            )
            .await
            .unwrap();
        assert_eq!(response.commit.sha, "c1");
        create.assert_async().await;

        let update = server
            .mock("PUT", "/repos/o/r/contents/tags.json")
            .match_body(Matcher::PartialJson(
                serde_json::json!({"message": "updated", "sha": "new1"}),
            ))
            .with_body(
                r#"{
                    "content": {"path": "tags.json", "sha": "new2"},
                    "commit": {"sha": "c2"}
                }"#,
            )
            .create_async()
            .await;

        let response = client(&server)
            .await
            .create_or_update_file(
                "o",
                "r",
                "tags.json",
                &NewFile::from_bytes("updated", b"{}", Some("new1".into())),
            )
            .await
            .unwrap();
        assert_eq!(response.commit.sha, "c2");
        update.assert_async().await;
    }
}
