//! HTML text helpers

use html_escape::decode_html_entities;

/// Characters that would be re-escaped in HTML output
const MARKUP_CHARS: [char; 6] = ['<', '>', '&', '"', '\'', '/'];

/// Reduce text to something safe to drop into unescaped HTML or an attribute
///
/// All character entities are decoded first, so `&lt;b&gt;` loses its
/// brackets just like a literal `<b>` does.
///
/// # Examples
/// ```ignore
/// plain_text("Tom &amp; Jerry's </b>") // -> "Tom  Jerrys b"
/// ```
pub fn plain_text(input: &str) -> String {
    decode_html_entities(input)
        .chars()
        .filter(|c| !MARKUP_CHARS.contains(c))
        .collect()
}
