//! Publishing a finished [`RunResult`](crate::pipeline::RunResult) to the
//! output repository with create-or-update semantics.

use github_client::{GithubClient, NewFile};
use serde::Serialize;

use crate::config::Settings;
use crate::error::{Result, TagdexError};
use crate::pipeline::RunResult;
use crate::APP_NAME;

/// Where a run's artifact ended up.
#[derive(Debug, Clone, Serialize)]
pub struct Published {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub commit_sha: String,
    /// `false` when the artifact was created fresh, `true` when an existing
    /// one was overwritten.
    pub updated: bool,
}

/// Write `result` to `tags-<owner>-<repo>.json` in the output repository.
///
/// If the file already exists, its current blob sha is read first and the
/// write becomes an update carrying that sha — GitHub rejects a blind
/// overwrite with a conflict otherwise. A 404 on the read is the normal
/// create branch, not an error.
pub async fn publish(
    client: &GithubClient,
    settings: &Settings,
    result: &RunResult,
) -> Result<Published> {
    let output = &settings.output;
    let path = settings.tags_path();

    let existing = match client.contents(&output.owner, &output.repo, &path).await {
        Ok(file) => Some(file.sha),
        Err(error) if error.is_not_found() => None,
        Err(source) => {
            return Err(TagdexError::Publish {
                owner: output.owner.clone(),
                repo: output.repo.clone(),
                path,
                source,
            })
        }
    };

    let message = match existing {
        Some(_) => format!("Tags file updated by {APP_NAME}"),
        None => format!("Tags file created by {APP_NAME}"),
    };
    let updated = existing.is_some();

    let body = serde_json::to_vec_pretty(result)?;
    let file = NewFile::from_bytes(message, &body, existing);

    let response = client
        .create_or_update_file(&output.owner, &output.repo, &path, &file)
        .await
        .map_err(|source| TagdexError::Publish {
            owner: output.owner.clone(),
            repo: output.repo.clone(),
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        owner = %output.owner,
        repo = %output.repo,
        path = %path,
        commit = %response.commit.sha,
        updated,
        "published tag index"
    );

    Ok(Published {
        owner: output.owner.clone(),
        repo: output.repo.clone(),
        path,
        commit_sha: response.commit.sha,
        updated,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
