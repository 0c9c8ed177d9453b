//! Post-write hooks
//!
//! Hooks run once, after every output file has been written.

mod torchlight;

pub use torchlight::{add_1p_ignore, mark_pre_tags, TorchlightHook};

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::Site;

/// A step that runs over the finished output directory
pub trait PostWriteHook {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn run(&self, site: &Site) -> Result<(), BuildError>;
}

/// Ordered list of post-write hooks
#[derive(Default)]
pub struct Hooks {
    hooks: Vec<Box<dyn PostWriteHook>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configured hooks
    pub fn from_config(config: &SiteConfig) -> Result<Self, BuildError> {
        let mut hooks = Self::new();
        hooks.push(TorchlightHook::new(&config.torchlight)?);
        Ok(hooks)
    }

    pub fn push<H: PostWriteHook + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Run every hook in order, stopping at the first failure
    pub fn run(&self, site: &Site) -> Result<(), BuildError> {
        for hook in &self.hooks {
            tracing::info!("Running post-write hook: {}", hook.name());
            hook.run(site)?;
        }
        Ok(())
    }
}
