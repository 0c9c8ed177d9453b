//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub source_dir: String,
    pub output_dir: String,

    // Writing
    /// Pattern splitting a content item into summary and remainder
    pub summary_separator: Option<String>,

    // Hooks
    #[serde(default)]
    pub anchors: AnchorConfig,
    #[serde(default)]
    pub katex: KatexConfig,
    #[serde(default)]
    pub torchlight: TorchlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            output_dir: "output".to_string(),
            summary_separator: None,
            anchors: AnchorConfig::default(),
            katex: KatexConfig::default(),
            torchlight: TorchlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Heading anchor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub enable: bool,
    /// Region the headings must live in
    pub container: String,
    pub class: String,
    pub symbol: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            enable: true,
            container: "main".to_string(),
            class: "anchor".to_string(),
            symbol: "#".to_string(),
        }
    }
}

/// KaTeX CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KatexConfig {
    pub enable: bool,
    /// Program followed by its arguments
    pub command: Vec<String>,
    /// Encoding label of the command's standard output
    pub output_encoding: String,
}

impl Default for KatexConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["npx".to_string(), "katex".to_string()],
            output_encoding: "utf-8".to_string(),
        }
    }
}

/// Torchlight highlighter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchlightConfig {
    pub enable: bool,
    pub command: Vec<String>,
    /// Mark `<pre>` tags with `data-1p-ignore` after highlighting
    pub ignore_password_managers: bool,
}

impl Default for TorchlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["yarn".to_string(), "torchlight".to_string()],
            ignore_password_managers: true,
        }
    }
}
