//! HTML inspectors
//!
//! An inspector takes the HTML of one generated page and returns the
//! rewritten page. Inspectors run in registration order, each one seeing
//! the output of the previous one.

mod anchors;
mod katex;

pub use anchors::AnchorInspector;
pub use katex::KatexInspector;

use crate::config::SiteConfig;
use crate::error::BuildError;

/// A single per-page rewrite stage
pub trait HtmlInspector {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Rewrite one page
    fn inspect(&self, html: &str) -> Result<String, BuildError>;
}

/// Ordered list of inspectors applied to every page
#[derive(Default)]
pub struct Inspectors {
    stages: Vec<Box<dyn HtmlInspector>>,
}

impl Inspectors {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the enabled inspectors from the site configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self, BuildError> {
        let mut inspectors = Self::new();

        if config.anchors.enable {
            inspectors.push(AnchorInspector::new(&config.anchors)?);
        }
        if config.katex.enable {
            inspectors.push(KatexInspector::new(&config.katex)?);
        }

        Ok(inspectors)
    }

    /// Append a stage to the end of the chain
    pub fn push<I: HtmlInspector + 'static>(&mut self, inspector: I) {
        self.stages.push(Box::new(inspector));
    }

    /// Names of the registered stages, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over `html`
    pub fn run(&self, html: &str) -> Result<String, BuildError> {
        let mut current = html.to_string();
        for stage in &self.stages {
            current = stage.inspect(&current)?;
        }
        Ok(current)
    }
}

/// Map a lol_html failure into our error type
pub(crate) fn rewrite_error(err: impl std::fmt::Display) -> BuildError {
    BuildError::Rewrite(err.to_string())
}
