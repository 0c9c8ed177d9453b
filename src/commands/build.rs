//! Post-process the generated site

use anyhow::{bail, Context, Result};
use std::fs;

use crate::helpers::{html_files, write_if_changed};
use crate::hooks::Hooks;
use crate::inspectors::Inspectors;
use crate::Site;

/// Inspect every page, then run the post-write hooks
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let changed = inspect(site)?;
    post_write(site)?;

    let duration = start.elapsed();
    tracing::info!(
        "Post-processed in {:.2}s ({} pages changed by inspectors)",
        duration.as_secs_f64(),
        changed
    );

    Ok(())
}

/// Run the configured inspectors over every HTML file in the output
/// directory. Returns the number of files rewritten.
pub fn inspect(site: &Site) -> Result<usize> {
    if !site.output_dir.is_dir() {
        bail!(
            "Output directory {:?} does not exist; generate the site first",
            site.output_dir
        );
    }

    let inspectors = Inspectors::from_config(&site.config)?;
    let files = html_files(&site.output_dir);

    if inspectors.is_empty() {
        tracing::info!("No inspectors enabled, skipping {} pages", files.len());
        return Ok(0);
    }

    tracing::info!(
        "Inspecting {} pages with [{}]",
        files.len(),
        inspectors.names().join(", ")
    );

    let mut changed = 0;
    for path in &files {
        let html =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let updated = inspectors
            .run(&html)
            .with_context(|| format!("Failed to process {:?}", path))?;
        if write_if_changed(path, &html, &updated)
            .with_context(|| format!("Failed to write {:?}", path))?
        {
            changed += 1;
        }
    }

    Ok(changed)
}

/// Run the post-write hooks once over the finished output
pub fn post_write(site: &Site) -> Result<()> {
    let hooks = Hooks::from_config(&site.config)?;
    hooks.run(site)?;
    Ok(())
}
