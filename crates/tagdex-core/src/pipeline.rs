//! The crawl pipeline: authenticate, resolve, list, fan out, finalize.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use github_client::{GithubClient, TreeEntry, TreeEntryKind};
use serde::Serialize;

use crate::aggregator::TagIndex;
use crate::config::{Settings, SourceRepo};
use crate::error::{Result, TagdexError};
use crate::front_matter::Document;

/// Fixed description stamped into every published result.
pub const DESCRIPTION: &str = "List of front matter tags found in the configured GitHub source";

// ─── RunResult ────────────────────────────────────────────────────────────

/// The finished product of one crawl: the aggregated tag index plus the
/// provenance needed to interpret it later. Serialized verbatim as the
/// published JSON artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub description: String,
    pub source: Source,
    pub tags: BTreeMap<String, Vec<String>>,
    pub creation_date: DateTime<Utc>,
}

/// Where the tags came from: the resolved tree snapshot and the identity
/// that crawled it.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub branch_url: String,
    pub sha: String,
    pub authenticated_user: String,
}

// ─── Pipeline ─────────────────────────────────────────────────────────────

/// Entries the pipeline processes: Markdown blobs only. Trees, submodule
/// pointers, and non-`.md` blobs are skipped.
pub fn is_markdown_blob(entry: &TreeEntry) -> bool {
    entry.kind == TreeEntryKind::Blob && entry.path.ends_with(".md")
}

/// Drive one full crawl of `settings.input` and return the aggregated
/// result, ready to publish.
///
/// Fatal failures (credential, branch resolution, listing, truncation)
/// abort with a [`TagdexError`]. Per-document fetch and parse failures are
/// logged at warn level and contribute no tags; the fan-out always settles
/// every document before the result is finalized.
pub async fn run(client: &GithubClient, settings: &Settings) -> Result<RunResult> {
    let input = &settings.input;

    // Verify the credential before any repository work.
    let user = client
        .authenticated_user()
        .await
        .map_err(TagdexError::Auth)?;
    tracing::info!(login = %user.login, "authenticated");

    let branch = client
        .branch(&input.owner, &input.repo, &input.branch)
        .await
        .map_err(|source| TagdexError::Resolution {
            owner: input.owner.clone(),
            repo: input.repo.clone(),
            branch: input.branch.clone(),
            source,
        })?;
    let sha = branch.commit.sha;
    tracing::info!(branch = %input.branch, sha = %sha, "resolved branch");

    let listing = client
        .recursive_tree(&input.owner, &input.repo, &sha)
        .await
        .map_err(|source| TagdexError::Listing {
            owner: input.owner.clone(),
            repo: input.repo.clone(),
            sha: sha.clone(),
            source,
        })?;
    if listing.truncated {
        return Err(TagdexError::TruncatedListing {
            owner: input.owner.clone(),
            repo: input.repo.clone(),
            sha,
        });
    }

    let markdown: Vec<&TreeEntry> = listing
        .tree
        .iter()
        .filter(|entry| is_markdown_blob(entry))
        .collect();
    tracing::info!(
        entries = listing.tree.len(),
        markdown = markdown.len(),
        "listed tree"
    );

    // Fan out one fetch-parse-merge task per Markdown blob and wait for
    // all of them to settle. A failing document never cancels its siblings.
    let index = TagIndex::new();
    let tasks = markdown
        .iter()
        .map(|entry| process_entry(client, input, &index, entry));
    futures::future::join_all(tasks).await;
    tracing::info!(tags = index.len(), "aggregation complete");

    Ok(RunResult {
        description: DESCRIPTION.to_string(),
        source: Source {
            owner: input.owner.clone(),
            repo: input.repo.clone(),
            branch: input.branch.clone(),
            branch_url: branch.links.self_url,
            sha: listing.sha,
            authenticated_user: user.login,
        },
        tags: index.into_map(),
        creation_date: Utc::now(),
    })
}

/// Fetch one document, extract its front matter, and merge its tags.
/// Failures are isolated here: logged, and the document contributes
/// nothing.
async fn process_entry(
    client: &GithubClient,
    input: &SourceRepo,
    index: &TagIndex,
    entry: &TreeEntry,
) {
    let text = match client.fetch_text(&input.owner, &input.repo, &entry.path).await {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(path = %entry.path, %error, "skipping document: fetch failed");
            return;
        }
    };

    let document = match Document::parse(&text) {
        Ok(document) => document,
        Err(error) => {
            tracing::warn!(path = %entry.path, %error, "skipping document: bad front matter");
            return;
        }
    };

    let tags = document.tags();
    if tags.is_empty() {
        tracing::debug!(path = %entry.path, "no tags declared");
        return;
    }
    tracing::debug!(path = %entry.path, count = tags.len(), "merging tags");
    index.merge(&entry.path, &tags);
}

// ─── Tests ────────────────────────────────────────────────────────────────
