//! Content items

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrontMatter, MarkdownRenderer};

/// A page or post: its body plus front-matter data
#[derive(Debug, Clone, Default)]
pub struct ContentItem {
    /// Source file path (empty for items built in memory)
    pub source: PathBuf,

    /// Body, as HTML when the source was markdown
    pub content: String,

    /// Front-matter fields
    pub data: HashMap<String, serde_yaml::Value>,
}

impl ContentItem {
    /// Create an item from its body alone
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set a front-matter field
    pub fn with_data(mut self, key: &str, value: impl Into<serde_yaml::Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Load a content file, splitting off its front-matter.
    /// Markdown bodies are rendered to HTML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let (front_matter, body) = FrontMatter::parse(&raw);

        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .map(MarkdownRenderer::handles)
            .unwrap_or(false);

        let content = if is_markdown {
            MarkdownRenderer::new().render(body)
        } else {
            body.to_string()
        };

        tracing::debug!(
            "Loaded {:?} ({} front-matter fields, markdown: {})",
            path,
            front_matter.data.len(),
            is_markdown
        );

        Ok(Self {
            source: path.to_path_buf(),
            content,
            data: front_matter.data,
        })
    }
}
