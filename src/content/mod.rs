//! Content module - content items, front-matter and summaries

mod frontmatter;
mod item;
mod markdown;
pub mod summary;

pub use frontmatter::FrontMatter;
pub use item::ContentItem;
pub use markdown::MarkdownRenderer;
pub use summary::{wrap_paragraph, Summarizer};
