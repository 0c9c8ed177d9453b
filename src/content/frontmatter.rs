//! Front-matter parsing

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter fields of a content file, kept as loosely typed data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    pub data: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Blocks that don't parse are left in the content, so this never fails.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        if content.starts_with("---") {
            Self::parse_yaml(content)
        } else if content.starts_with(";;;") {
            Self::parse_fenced_json(content)
        } else if opens_json_object(content) {
            Self::parse_bare_json(content)
        } else {
            (FrontMatter::default(), content)
        }
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.data.get(key)
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading `---` is also a Markdown thematic break; only treat the
        // block as front-matter when some line looks like `key: value`.
        let has_yaml_structure = yaml_content.lines().any(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return false;
            }
            let Some(colon_pos) = trimmed.find(':') else {
                return false;
            };
            let key = &trimmed[..colon_pos];
            let is_valid_key = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && !matches!(key, "http" | "https" | "ftp");
            let after_colon = &trimmed[colon_pos + 1..];
            is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
        });

        if !has_yaml_structure {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// `;;;`-fenced JSON. An unterminated fence is plain content.
    fn parse_fenced_json(content: &str) -> (Self, &str) {
        let rest = &content[3..];
        let Some(end_pos) = rest.find(";;;") else {
            return (FrontMatter::default(), content);
        };

        match serde_json::from_str::<FrontMatter>(&rest[..end_pos]) {
            Ok(fm) => (fm, rest[end_pos + 3..].trim_start_matches(['\n', '\r'])),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse JSON front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// A bare JSON object opening the file. Only the first value is
    /// consumed; whatever follows it is the body.
    fn parse_bare_json(content: &str) -> (Self, &str) {
        let mut values = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
        match values.next() {
            Some(Ok(fm)) => {
                let remaining = content[values.byte_offset()..].trim_start_matches(['\n', '\r']);
                (fm, remaining)
            }
            Some(Err(e)) => {
                tracing::warn!(
                    "Failed to parse JSON front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
            None => (FrontMatter::default(), content),
        }
    }
}

/// `{` followed by a quoted key. Template tags such as `{{ ... }}` and
/// `{% ... %}` also open with a brace and must stay in the body.
fn opens_json_object(content: &str) -> bool {
    content
        .strip_prefix('{')
        .map(|rest| rest.trim_start().starts_with('"'))
        .unwrap_or(false)
}
