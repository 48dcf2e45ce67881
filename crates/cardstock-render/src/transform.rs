//! Structural transform: decide, node by node, whether markdown renders
//! as prose or is promoted to a link card.
//!
//! Authors write plain markdown without knowing about cards, so the
//! promotion guards are strict: a paragraph is promoted only when a link
//! (or a bare URL) is its *sole* child. Under-promotion degrades to
//! ordinary prose; over-promotion would silently drop surrounding text
//! and must not occur.

use cardstock_core::{ContentBlock, InlineElement, ListItem};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A bare `http(s)://` URL standing alone in a text node.
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Leading dash-like separator on a card description: em dash, en dash,
/// or hyphen, with optional surrounding whitespace.
static DASH_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[—–-]\s*").unwrap());

/// Cosmetic theme flag, passed through to the presentation layer.
///
/// Never part of the promotion decision logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// A promoted link rendering: a distinct visual block carrying
/// title/description/href, replacing plain inline rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCard {
    pub href: String,
    pub title: String,
    pub description: Option<String>,
    /// External links open in a new browsing context with opener and
    /// referrer isolation; internal links do not.
    pub external: bool,
}

/// A block in the final presentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderedBlock {
    /// A paragraph promoted to a link card
    Card(LinkCard),
    /// A paragraph kept as ordinary prose
    Prose { inline: Vec<InlineElement> },
    Heading {
        level: usize,
        inline: Vec<InlineElement>,
    },
    Code {
        language: Option<String>,
        content: String,
    },
    List {
        ordered: bool,
        items: Vec<RenderedItem>,
    },
    /// Blockquote children are styled, never reclassified
    Blockquote { blocks: Vec<ContentBlock> },
    Rule,
    Html { content: String },
}

/// A list item in the final presentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderedItem {
    /// An item promoted to a link card
    Card(LinkCard),
    /// A bordered block holding the item's normal children
    Bordered {
        inline: Vec<InlineElement>,
        blocks: Vec<ContentBlock>,
    },
}

/// The structural markdown transform.
///
/// Walks a parsed [`ContentBlock`] tree and emits the presentation tree,
/// applying the card promotion rules to paragraphs and list items. All
/// other node kinds pass through with theme-appropriate styling only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    theme: Theme,
}

impl Transform {
    /// Create a transform for the given theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// The cosmetic theme this transform was built with.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Render a parsed body into the presentation tree.
    pub fn render(&self, blocks: &[ContentBlock]) -> Vec<RenderedBlock> {
        blocks.iter().map(|block| self.render_block(block)).collect()
    }

    fn render_block(&self, block: &ContentBlock) -> RenderedBlock {
        match block {
            ContentBlock::Paragraph { inline } => self.render_paragraph(inline),
            ContentBlock::List { ordered, items } => RenderedBlock::List {
                ordered: *ordered,
                items: items.iter().map(|item| self.render_item(item)).collect(),
            },
            ContentBlock::Heading { level, inline } => RenderedBlock::Heading {
                level: *level,
                inline: inline.clone(),
            },
            ContentBlock::Code { language, content } => RenderedBlock::Code {
                language: language.clone(),
                content: content.clone(),
            },
            ContentBlock::Blockquote { blocks } => RenderedBlock::Blockquote {
                blocks: blocks.clone(),
            },
            ContentBlock::Rule => RenderedBlock::Rule,
            ContentBlock::Html { content } => RenderedBlock::Html {
                content: content.clone(),
            },
        }
    }

    /// Paragraph promotion: a sole link child, or a sole bare-URL text
    /// child, becomes a card. Everything else is prose.
    fn render_paragraph(&self, inline: &[InlineElement]) -> RenderedBlock {
        match inline {
            [InlineElement::Link { text, url, .. }] => {
                RenderedBlock::Card(card_from_link(text, url, None))
            }
            [InlineElement::Text { value }] if BARE_URL.is_match(value.trim()) => {
                let url = value.trim();
                RenderedBlock::Card(LinkCard {
                    href: url.to_string(),
                    title: strip_scheme(url).to_string(),
                    description: None,
                    external: is_external_url(url),
                })
            }
            _ => RenderedBlock::Prose {
                inline: inline.to_vec(),
            },
        }
    }

    /// List-item promotion: a leading link child becomes a card; a text
    /// node right after it becomes the description, minus the authoring
    /// idiom's dash separator (`- [Title](url) — description`).
    fn render_item(&self, item: &ListItem) -> RenderedItem {
        match item.inline.as_slice() {
            [InlineElement::Link { text, url, .. }, rest @ ..] => {
                let description = match rest.first() {
                    Some(InlineElement::Text { value }) => strip_dash_prefix(value),
                    _ => None,
                };
                RenderedItem::Card(card_from_link(text, url, description))
            }
            _ => RenderedItem::Bordered {
                inline: item.inline.clone(),
                blocks: item.blocks.clone(),
            },
        }
    }
}

/// A URL is external iff it starts with `http://` or `https://`,
/// case-insensitively. Applies to every rendered hyperlink, card or
/// inline.
pub fn is_external_url(url: &str) -> bool {
    has_prefix_ignore_case(url, "http://") || has_prefix_ignore_case(url, "https://")
}

fn card_from_link(text: &str, url: &str, description: Option<String>) -> LinkCard {
    let title = if text.trim().is_empty() {
        url.to_string()
    } else {
        text.to_string()
    };
    LinkCard {
        href: url.to_string(),
        title,
        description,
        external: is_external_url(url),
    }
}

/// Strip the scheme prefix for a bare-URL card title.
fn strip_scheme(url: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if has_prefix_ignore_case(url, scheme) {
            return &url[scheme.len()..];
        }
    }
    url
}

/// Strip one leading dash-like separator and surrounding whitespace;
/// a description that strips to nothing is omitted.
fn strip_dash_prefix(value: &str) -> Option<String> {
    let stripped = DASH_PREFIX.replace(value, "");
    let trimmed = stripped.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
