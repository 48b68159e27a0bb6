//! Core pipeline for `tagdex`: crawl a GitHub repository's Markdown files,
//! extract the `tags` field from their YAML front matter, aggregate a
//! tag → paths index, and publish it as pretty-printed JSON to a
//! destination repository.
//!
//! Control flow is linear with one concurrent stage:
//!
//! ```text
//! authenticate → resolve branch → list tree
//!     → fan out (fetch + parse + merge) over every Markdown blob
//!     → finalize provenance → publish
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod front_matter;
pub mod pipeline;
pub mod publish;

pub use error::{Result, TagdexError};

/// Name this tool identifies itself as, in commit messages and logs.
pub const APP_NAME: &str = "tagdex";
