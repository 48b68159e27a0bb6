//! Leading YAML front matter extraction for Markdown documents.
//!
//! A front matter block is a `---` line at the very start of the document,
//! a YAML region, and a closing `---` line. Documents without one are
//! normal; only malformed YAML inside a present block is an error.

use serde_yaml::Value;

/// A Markdown document split into optional front matter and body.
#[derive(Debug)]
pub struct Document<'a> {
    front_matter: Option<Value>,
    body: &'a str,
}

impl<'a> Document<'a> {
    /// Split and parse `text`. Absent front matter yields `Ok` with no
    /// attributes; a present block that is not valid YAML yields `Err` so
    /// the caller can decide to log and move on.
    pub fn parse(text: &'a str) -> std::result::Result<Self, serde_yaml::Error> {
        match split_front_matter(text) {
            Some((block, body)) if !block.trim().is_empty() => {
                let front_matter: Value = serde_yaml::from_str(block)?;
                Ok(Document {
                    front_matter: Some(front_matter),
                    body,
                })
            }
            Some((_, body)) => Ok(Document {
                front_matter: None,
                body,
            }),
            None => Ok(Document {
                front_matter: None,
                body: text,
            }),
        }
    }

    pub fn front_matter(&self) -> Option<&Value> {
        self.front_matter.as_ref()
    }

    /// Document text after the front matter block (the whole text when
    /// there is none).
    pub fn body(&self) -> &str {
        self.body
    }

    /// The declared tags: the front matter `tags` value split on commas,
    /// with every token stripped of ALL whitespace and empty tokens
    /// dropped. Missing front matter, a missing `tags` key, or a
    /// non-string `tags` value all yield an empty list.
    pub fn tags(&self) -> Vec<String> {
        let raw = self
            .front_matter
            .as_ref()
            .and_then(|fm| fm.get("tags"))
            .and_then(Value::as_str);
        match raw {
            Some(raw) => split_tags(raw),
            None => Vec::new(),
        }
    }
}

/// Split a comma-separated tag string. Whitespace is removed from anywhere
/// inside each token, not just the ends, so `"my tag"` becomes `mytag`.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| {
            token
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Locate a leading front matter block. Returns `(yaml_region, body)` when
/// the document opens with a `---` line that is later closed by one.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }
    None
}

// ─── Tests ────────────────────────────────────────────────────────────────
