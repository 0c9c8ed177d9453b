//! Permalink anchors for content headings

use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use lol_html::html_content::{ContentType, Element};
use lol_html::{element, end_tag, rewrite_str, RewriteStrSettings};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{rewrite_error, HtmlInspector};
use crate::config::AnchorConfig;
use crate::error::BuildError;

/// Appends `<a href="#id" class="anchor" aria-hidden="true">#</a>` to every
/// `h2`..`h6` with an `id` inside the content region.
///
/// A heading whose direct children already include an anchor pointing at
/// its own id is left alone, so running over an already processed page is
/// a no-op.
pub struct AnchorInspector {
    headings: String,
    links: String,
    class: String,
    symbol: String,
}

/// A matching heading whose end tag hasn't been reached yet
struct OpenHeading {
    id: String,
    anchored: bool,
}

impl AnchorInspector {
    pub fn new(config: &AnchorConfig) -> Result<Self, BuildError> {
        let container = config.container.trim();
        let heading_selector = |level: usize, suffix: &str| {
            if container.is_empty() {
                format!("h{}[id]{}", level, suffix)
            } else {
                format!("{} h{}[id]{}", container, level, suffix)
            }
        };
        let headings = (2..=6)
            .map(|level| heading_selector(level, ""))
            .collect::<Vec<_>>()
            .join(", ");
        let links = (2..=6)
            .map(|level| heading_selector(level, " > a"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            headings: validate(headings)?,
            links: validate(links)?,
            class: config.class.clone(),
            symbol: config.symbol.clone(),
        })
    }

    /// Markup appended to a heading with the given (decoded) id
    fn anchor_html(&self, id: &str) -> String {
        format!(
            r##"<a href="#{}" class="{}" aria-hidden="true">{}</a>"##,
            encode_double_quoted_attribute(id),
            encode_double_quoted_attribute(&self.class),
            encode_text(&self.symbol)
        )
    }

    /// Whether `link` is an anchor of ours pointing at `id`
    fn points_at(&self, link: &Element, id: &str) -> bool {
        let has_class = link
            .get_attribute("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == self.class))
            .unwrap_or(false);
        has_class
            && link
                .get_attribute("href")
                .and_then(|href| decode_html_entities(&href).strip_prefix('#').map(|h| h == id))
                .unwrap_or(false)
    }
}

// lol_html panics on selectors it can't parse, so reject them here
fn validate(selector: String) -> Result<String, BuildError> {
    selector
        .parse::<lol_html::Selector>()
        .map_err(|e| BuildError::Rewrite(format!("invalid selector {:?}: {}", selector, e)))?;
    Ok(selector)
}

impl HtmlInspector for AnchorInspector {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn inspect(&self, html: &str) -> Result<String, BuildError> {
        let open: Rc<RefCell<Vec<OpenHeading>>> = Rc::default();
        let added = Rc::new(Cell::new(0usize));

        let rewritten = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(self.headings.as_str(), |el| {
                        let Some(raw) = el.get_attribute("id") else {
                            return Ok(());
                        };
                        let id = decode_html_entities(&raw).into_owned();
                        if id.trim().is_empty() {
                            return Ok(());
                        }

                        let anchor = self.anchor_html(&id);
                        open.borrow_mut().push(OpenHeading {
                            id,
                            anchored: false,
                        });
                        let open = Rc::clone(&open);
                        let added = Rc::clone(&added);
                        el.on_end_tag(end_tag!(move |end| {
                            if let Some(heading) = open.borrow_mut().pop() {
                                if !heading.anchored {
                                    end.before(&anchor, ContentType::Html);
                                    added.set(added.get() + 1);
                                }
                            }
                            Ok(())
                        }))
                    }),
                    element!(self.links.as_str(), |el| {
                        if let Some(heading) = open.borrow_mut().last_mut() {
                            if self.points_at(el, &heading.id) {
                                heading.anchored = true;
                            }
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(rewrite_error)?;

        if added.get() > 0 {
            tracing::debug!("Added {} heading anchors", added.get());
        }

        Ok(rewritten)
    }
}
