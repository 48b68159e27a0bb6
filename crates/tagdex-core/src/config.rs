use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Run settings, loaded from a YAML file:
///
/// ```yaml
/// input:
///   owner: octocat
///   repo: hello-world
///   branch: main        # optional, defaults to "main"
/// output:
///   owner: octocat
///   repo: scratch
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: SourceRepo,
    pub output: TargetRepo,
}

/// The repository and branch to crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRepo {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

/// The repository the tag index is published to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRepo {
    pub owner: String,
    pub repo: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Destination path of the published artifact, derived from the source
    /// repository so one output repo can hold indexes for many sources.
    pub fn tags_path(&self) -> String {
        format!("tags-{}-{}.json", self.input.owner, self.input.repo)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
