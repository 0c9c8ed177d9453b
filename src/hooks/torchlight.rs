//! Torchlight highlighting and `<pre>` password-manager exemption

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use super::PostWriteHook;
use crate::config::TorchlightConfig;
use crate::error::BuildError;
use crate::helpers::{html_files, write_if_changed, ExternalCommand};
use crate::Site;

/// Tells 1Password not to offer autofill inside the element
const IGNORE_ATTR: &str = "data-1p-ignore";

lazy_static! {
    /// A `<pre>` start tag; group 1 holds the attributes, if any
    static ref PRE_TAG: Regex = Regex::new(r"<pre(\s[^>]*)?>").unwrap();
}

/// Runs the highlighter over the output directory, then marks every `<pre>`
/// with `data-1p-ignore`.
pub struct TorchlightHook {
    command: Option<ExternalCommand>,
    ignore_password_managers: bool,
}

impl TorchlightHook {
    pub fn new(config: &TorchlightConfig) -> Result<Self, BuildError> {
        let command = if config.enable {
            Some(ExternalCommand::from_parts("torchlight", &config.command)?)
        } else {
            None
        };

        Ok(Self {
            command,
            ignore_password_managers: config.ignore_password_managers,
        })
    }
}

impl PostWriteHook for TorchlightHook {
    fn name(&self) -> &'static str {
        "torchlight"
    }

    fn run(&self, site: &Site) -> Result<(), BuildError> {
        match &self.command {
            Some(command) => {
                tracing::info!("Highlighting with `{}`", command.display());
                command.run_in(&site.base_dir)?;
            }
            None => tracing::debug!("Torchlight disabled, skipping highlighter"),
        }

        if self.ignore_password_managers {
            let changed = mark_pre_tags(&site.output_dir)?;
            tracing::info!("Marked <pre> tags in {} files", changed);
        }

        Ok(())
    }
}

/// Add `data-1p-ignore` to every `<pre>` tag under `output_dir`.
/// Returns the number of files rewritten.
pub fn mark_pre_tags(output_dir: &Path) -> Result<usize, BuildError> {
    let mut changed = 0;
    for path in html_files(output_dir) {
        let content = fs::read_to_string(&path)?;
        let modified = add_1p_ignore(&content);
        if write_if_changed(&path, &content, &modified)? {
            changed += 1;
        }
    }
    Ok(changed)
}

/// Insert `data-1p-ignore` right after the tag name of each `<pre>` that
/// doesn't already carry it
pub fn add_1p_ignore(html: &str) -> Cow<'_, str> {
    PRE_TAG.replace_all(html, |caps: &Captures| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        if attrs.contains(IGNORE_ATTR) {
            caps[0].to_string()
        } else {
            format!("<pre {}{}>", IGNORE_ATTR, attrs)
        }
    })
}
