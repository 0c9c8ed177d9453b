//! Print the summary of a content file

use anyhow::Result;
use std::path::Path;

use crate::content::{ContentItem, Summarizer};
use crate::Site;

/// Summary of the content file at `path` (relative paths resolve against
/// the site's base directory)
pub fn run(site: &Site, path: &Path) -> Result<String> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        site.base_dir.join(path)
    };

    let summarizer = Summarizer::from_config(&site.config)?;
    let item = ContentItem::load(&path)?;
    Ok(summarizer.summarize(&item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_summary_of_markdown_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "summary_separator: \"<!--more-->\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("src/_posts")).unwrap();
        fs::write(
            dir.path().join("src/_posts/hello.md"),
            "---\ntitle: Hello\n---\n\nIntro **text**.\n\n<!--more-->\n\nThe rest.\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let summary = run(&site, Path::new("src/_posts/hello.md")).unwrap();
        assert_eq!(summary, "<p>Intro <strong>text</strong>.</p>");
    }

    #[test]
    fn test_summary_field_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "---\nsummary: Given\n---\n<p>Body</p>\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(run(&site, &path).unwrap(), "<p>Given</p>");
    }

    #[test]
    fn test_template_tag_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liquid.html");
        fs::write(&path, "{{ page.title }} intro\nmore\n").unwrap();
        let raw = dir.path().join("raw.html");
        fs::write(&raw, "{% raw %}\nFirst line.\n{% endraw %}\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(run(&site, &path).unwrap(), "<p>{{ page.title }} intro</p>");
        assert_eq!(run(&site, &raw).unwrap(), "<p>{% raw %}</p>");
    }
}
