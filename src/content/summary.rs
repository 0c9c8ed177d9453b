//! Summary (excerpt) extraction

use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;

use super::ContentItem;
use crate::config::SiteConfig;

/// Derives the short HTML excerpt shown in listings.
///
/// In priority order the body comes from the `summary` front-matter field,
/// the content before the first `summary_separator` match, or the first
/// non-empty line of the content. The result is always wrapped in a single
/// paragraph, see [`wrap_paragraph`].
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    separator: Option<Regex>,
}

impl Summarizer {
    /// `separator` is a regular expression; a blank pattern means none
    pub fn new(separator: Option<&str>) -> Result<Self> {
        let separator = separator
            .filter(|s| !s.is_empty())
            .map(|s| Regex::new(s).with_context(|| format!("Invalid summary_separator {:?}", s)))
            .transpose()?;
        Ok(Self { separator })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(config.summary_separator.as_deref())
    }

    /// Summary of `item`, wrapped in `<p>...</p>`
    pub fn summarize(&self, item: &ContentItem) -> String {
        wrap_paragraph(&self.body(item))
    }

    fn body<'a>(&self, item: &'a ContentItem) -> Cow<'a, str> {
        if let Some(summary) = item.data.get("summary") {
            return value_to_text(summary);
        }

        if let Some(separator) = &self.separator {
            if let Some(found) = separator.find(&item.content) {
                return Cow::Borrowed(&item.content[..found.start()]);
            }
        }

        Cow::Borrowed(
            item.content
                .trim()
                .lines()
                .next()
                .unwrap_or_default()
                .trim(),
        )
    }
}

/// Trim `summary` and make it start with `<p>` and end with `</p>`,
/// adding whichever of the two is missing. Idempotent.
pub fn wrap_paragraph(summary: &str) -> String {
    let summary = summary.trim();
    let opens = starts_with_paragraph(summary);
    let closes = summary.ends_with("</p>");

    match (opens, closes) {
        (true, true) => summary.to_string(),
        (true, false) => format!("{}</p>", summary),
        (false, true) => format!("<p>{}", summary),
        (false, false) => format!("<p>{}</p>", summary),
    }
}

/// `<p>` or `<p ...>`, but not `<pre>` or `<picture>`
fn starts_with_paragraph(s: &str) -> bool {
    s.strip_prefix("<p")
        .and_then(|rest| rest.chars().next())
        .map(|c| c == '>' || c.is_ascii_whitespace())
        .unwrap_or(false)
}

/// Text of a front-matter value; scalars print as written, `null` is empty
fn value_to_text(value: &serde_yaml::Value) -> Cow<'_, str> {
    use serde_yaml::Value;

    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Tagged(tagged) => value_to_text(&tagged.value),
        other => Cow::Owned(
            serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer(separator: Option<&str>) -> Summarizer {
        Summarizer::new(separator).unwrap()
    }

    #[test]
    fn test_explicit_summary() {
        let item = ContentItem::new("Body text.").with_data("summary", "hello");
        assert_eq!(summarizer(None).summarize(&item), "<p>hello</p>");
    }

    #[test]
    fn test_explicit_summary_wins_over_separator() {
        let item = ContentItem::new("Intro<!--more-->rest").with_data("summary", "given");
        assert_eq!(
            summarizer(Some("<!--more-->")).summarize(&item),
            "<p>given</p>"
        );
    }

    #[test]
    fn test_non_string_summary() {
        let item = ContentItem::new("Body").with_data("summary", 42);
        assert_eq!(summarizer(None).summarize(&item), "<p>42</p>");

        let item = ContentItem::new("Body").with_data("summary", serde_yaml::Value::Null);
        assert_eq!(summarizer(None).summarize(&item), "<p></p>");
    }

    #[test]
    fn test_separator() {
        let item = ContentItem::new("Intro text<!--more-->rest");
        assert_eq!(
            summarizer(Some("<!--more-->")).summarize(&item),
            "<p>Intro text</p>"
        );
    }

    #[test]
    fn test_separator_keeps_existing_paragraph() {
        let item = ContentItem::new("<p>Intro</p>\n<!--more-->\n<p>Rest</p>");
        assert_eq!(
            summarizer(Some("<!--more-->")).summarize(&item),
            "<p>Intro</p>"
        );
    }

    #[test]
    fn test_separator_is_a_pattern() {
        let item = ContentItem::new("Lead<!-- more -->tail");
        assert_eq!(
            summarizer(Some(r"<!--\s*more\s*-->")).summarize(&item),
            "<p>Lead</p>"
        );
    }

    #[test]
    fn test_unmatched_separator_uses_first_line() {
        let item = ContentItem::new("First line.\nSecond line.");
        assert_eq!(
            summarizer(Some("<!--more-->")).summarize(&item),
            "<p>First line.</p>"
        );
    }

    #[test]
    fn test_first_line() {
        let item = ContentItem::new("\n\n  First line.  \nSecond line.");
        assert_eq!(summarizer(None).summarize(&item), "<p>First line.</p>");
    }

    #[test]
    fn test_first_line_of_rendered_html() {
        let item = ContentItem::new("<p>First line.\nSecond line.</p>\n");
        assert_eq!(summarizer(None).summarize(&item), "<p>First line.</p>");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(summarizer(None).summarize(&ContentItem::new("")), "<p></p>");
    }

    #[test]
    fn test_invalid_separator() {
        assert!(Summarizer::new(Some("(unclosed")).is_err());
        assert!(Summarizer::new(Some("")).unwrap().separator.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = SiteConfig {
            summary_separator: Some("<!--more-->".to_string()),
            ..SiteConfig::default()
        };
        let item = ContentItem::new("A<!--more-->B");
        assert_eq!(
            Summarizer::from_config(&config).unwrap().summarize(&item),
            "<p>A</p>"
        );
    }

    #[test]
    fn test_wrap_paragraph() {
        assert_eq!(wrap_paragraph("  text  "), "<p>text</p>");
        assert_eq!(wrap_paragraph("<p>text"), "<p>text</p>");
        assert_eq!(wrap_paragraph("text</p>"), "<p>text</p>");
        assert_eq!(wrap_paragraph("<p>text</p>"), "<p>text</p>");
        assert_eq!(
            wrap_paragraph(r#"<p class="lead">text"#),
            r#"<p class="lead">text</p>"#
        );
        assert_eq!(wrap_paragraph("<pre>code</pre>"), "<p><pre>code</pre></p>");
    }

    #[test]
    fn test_wrap_paragraph_idempotent() {
        let inputs = [
            "",
            "text",
            "<p>text",
            "text</p>",
            "<p>a</p><p>b</p>",
            "<p",
            "  <p>spaced</p>  ",
            "<pre>x</pre>",
        ];
        for input in inputs {
            let once = wrap_paragraph(input);
            assert_eq!(wrap_paragraph(&once), once, "input {:?}", input);
            assert!(once.starts_with("<p"));
            assert!(once.ends_with("</p>"));
        }
    }
}
