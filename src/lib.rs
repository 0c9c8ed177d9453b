//! sitepost: post-processing for a generated static site
//!
//! Runs the per-page HTML inspectors (heading anchors, KaTeX) over the
//! output directory, then the post-write hooks (Torchlight highlighting and
//! `<pre>` marking). Also derives content summaries and plain-text strings
//! for templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod hooks;
pub mod inspectors;

pub use error::BuildError;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content source directory
    pub source_dir: PathBuf,
    /// Generated output directory
    pub output_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            source_dir,
            output_dir,
        }
    }

    /// Inspect every page, then run the post-write hooks
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Run the HTML inspectors over the output directory
    pub fn inspect(&self) -> Result<usize> {
        commands::build::inspect(self)
    }

    /// Run the post-write hooks
    pub fn highlight(&self) -> Result<()> {
        commands::build::post_write(self)
    }

    /// Summary of a content file
    pub fn summary<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        commands::summary::run(self, path.as_ref())
    }
}
