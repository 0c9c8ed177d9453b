//! KaTeX rendering through the `katex` CLI

use encoding_rs::Encoding;
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use scraper::{Html, Selector};
use std::collections::HashMap;

use super::{rewrite_error, HtmlInspector};
use crate::config::KatexConfig;
use crate::error::BuildError;
use crate::helpers::{encoding_for_label, ExternalCommand};

/// Marker attribute for elements whose text is TeX source
const MARKER: &str = "data-katex";

/// Replaces the content of every `[data-katex]` element with the output of
/// the configured KaTeX command, fed the element's text on stdin.
///
/// A marked element nested inside another marked element is part of the
/// outer element's source and is not rendered on its own.
pub struct KatexInspector {
    command: ExternalCommand,
    encoding: &'static Encoding,
}

impl KatexInspector {
    pub fn new(config: &KatexConfig) -> Result<Self, BuildError> {
        Ok(Self {
            command: ExternalCommand::from_parts("katex", &config.command)?,
            encoding: encoding_for_label(&config.output_encoding)?,
        })
    }

    /// Drop the marker from elements nested inside another marked element.
    /// Their content is replaced along with the outer element's, and
    /// afterwards every remaining marker is an outermost one.
    fn unmark_nested(html: &str) -> Result<String, BuildError> {
        rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("[data-katex] [data-katex]", |el| {
                    el.remove_attribute(MARKER);
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(rewrite_error)
    }

    /// Text of each marked element, in document order. `<noscript>`
    /// content is raw text to both parsers, so markers inside it are never
    /// rendered.
    fn sources(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("[data-katex]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    /// Render one TeX source to HTML
    pub fn render(&self, source: &str) -> Result<String, BuildError> {
        let output = self.command.capture(source, self.encoding)?;
        Ok(output.trim().to_string())
    }
}

impl HtmlInspector for KatexInspector {
    fn name(&self) -> &'static str {
        "katex"
    }

    fn inspect(&self, html: &str) -> Result<String, BuildError> {
        if !html.contains(MARKER) {
            return Ok(html.to_string());
        }

        let html = Self::unmark_nested(html)?;
        let sources = Self::sources(&html);
        if sources.is_empty() {
            return Ok(html);
        }

        let mut cache: HashMap<&str, String> = HashMap::new();
        let mut rendered = Vec::with_capacity(sources.len());
        for source in &sources {
            let output = match cache.get(source.as_str()) {
                Some(output) => output.clone(),
                None => {
                    let output = self.render(source)?;
                    cache.insert(source.as_str(), output.clone());
                    output
                }
            };
            rendered.push(output);
        }
        tracing::debug!(
            "Rendered {} math elements ({} distinct)",
            rendered.len(),
            cache.len()
        );

        let mut next = 0usize;
        let rewritten = rewrite_str(
            &html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("[data-katex]", |el| {
                    if let Some(content) = rendered.get(next) {
                        el.set_inner_content(content, ContentType::Html);
                    }
                    next += 1;
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(rewrite_error)?;

        // html5ever and lol_html can disagree on badly broken markup
        if next != rendered.len() {
            return Err(BuildError::Rewrite(format!(
                "found {} math elements but rewrote {}",
                rendered.len(),
                next
            )));
        }

        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspector(command: &[&str]) -> KatexInspector {
        KatexInspector::new(&KatexConfig {
            command: command.iter().map(|s| s.to_string()).collect(),
            ..KatexConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_sources_outermost_only() {
        let html = r#"<p><span data-katex>a &lt; b</span> and <span data-katex="display">x<span data-katex>y</span></span></p>"#;
        let html = KatexInspector::unmark_nested(html).unwrap();
        assert_eq!(
            html,
            r#"<p><span data-katex>a &lt; b</span> and <span data-katex="display">x<span>y</span></span></p>"#
        );
        assert_eq!(KatexInspector::sources(&html), vec!["a < b", "xy"]);
    }

    #[test]
    fn test_no_math_is_untouched() {
        // Never spawned, so a bogus command is fine
        let inspector = inspector(&["sitepost-no-such-program"]);
        let html = "<main><p>No math here.</p></main>";
        assert_eq!(inspector.inspect(html).unwrap(), html);
    }

    #[test]
    fn test_unknown_encoding() {
        let config = KatexConfig {
            output_encoding: "klingon".to_string(),
            ..KatexConfig::default()
        };
        assert!(matches!(
            KatexInspector::new(&config),
            Err(BuildError::UnknownEncoding(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_replaces_content() {
        // `sed` wraps the source so we can see it went through the command
        let inspector = inspector(&["sed", "s/.*/<b>&<\\/b>/"]);
        let html = r#"<p>Area: <span data-katex>\pi r^2</span>.</p>"#;
        let out = inspector.inspect(html).unwrap();
        assert_eq!(out, r#"<p>Area: <span data-katex><b>\pi r^2</b></span>.</p>"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_trimmed_and_replaces_children() {
        let inspector = inspector(&["sh", "-c", "echo; cat; echo"]);
        let html = r#"<div data-katex>  x<em>2</em>  </div>"#;
        let out = inspector.inspect(html).unwrap();
        assert_eq!(out, r#"<div data-katex>x2</div>"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_nested_marker_rendered_with_parent() {
        let inspector = inspector(&["cat"]);
        let html = r#"<div data-katex>a<span data-katex>b</span></div><span data-katex>c</span>"#;
        let out = inspector.inspect(html).unwrap();
        assert_eq!(out, r#"<div data-katex>ab</div><span data-katex>c</span>"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_noscript_left_as_text() {
        let inspector = inspector(&["sed", "s/.*/[&]/"]);
        let html = r#"<noscript><span data-katex>a</span></noscript><p><span data-katex>b</span></p>"#;
        let out = inspector.inspect(html).unwrap();
        assert_eq!(
            out,
            r#"<noscript><span data-katex>a</span></noscript><p><span data-katex>[b]</span></p>"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_fails_the_page() {
        let inspector = inspector(&["false"]);
        let err = inspector
            .inspect(r#"<span data-katex>x</span>"#)
            .unwrap_err();
        assert!(matches!(err, BuildError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_malformed_output_rejected() {
        let inspector = inspector(&["printf", "\\377"]);
        let err = inspector
            .inspect(r#"<span data-katex>x</span>"#)
            .unwrap_err();
        assert!(matches!(err, BuildError::Encoding { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_declared_encoding_normalized() {
        let inspector = KatexInspector::new(&KatexConfig {
            command: vec!["printf".to_string(), "caf\\351".to_string()],
            output_encoding: "windows-1252".to_string(),
            ..KatexConfig::default()
        })
        .unwrap();
        let out = inspector.inspect(r#"<span data-katex>x</span>"#).unwrap();
        assert_eq!(out, "<span data-katex>café</span>");
    }
}
