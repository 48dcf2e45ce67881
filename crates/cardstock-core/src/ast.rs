//! Typed markdown syntax tree consumed by the structural transform.
//!
//! The tree covers the block-level structure of a document body plus the
//! inline elements the transform inspects. Node kinds are a closed set of
//! variants so promotion guards ("exactly one child which is a link") are
//! exhaustive pattern matches rather than ad-hoc field probing.
//!
//! GFM/math constructs the pipeline does not reinterpret surface as opaque
//! [`ContentBlock::Html`] / [`InlineElement::Html`] passthrough nodes.

use serde::{Deserialize, Serialize};

/// A block-level node in a parsed markdown body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A heading (# H1 through ###### H6)
    Heading {
        level: usize,
        inline: Vec<InlineElement>,
    },
    /// A paragraph of inline content
    Paragraph { inline: Vec<InlineElement> },
    /// A fenced or indented code block
    Code {
        language: Option<String>,
        content: String,
    },
    /// An ordered or unordered list
    List { ordered: bool, items: Vec<ListItem> },
    /// A blockquote (> text)
    Blockquote { blocks: Vec<ContentBlock> },
    /// A horizontal rule (---, ***, ___)
    Rule,
    /// Raw HTML or other opaque passthrough content
    Html { content: String },
}

impl ContentBlock {
    /// Extract the visible text content, stripping markup.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Heading { inline, .. } | Self::Paragraph { inline } => {
                inline.iter().map(InlineElement::to_plain_text).collect()
            }
            Self::Code { content, .. } => content.clone(),
            Self::List { items, .. } => items
                .iter()
                .map(ListItem::to_plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Blockquote { blocks } => blocks
                .iter()
                .map(Self::to_plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Rule => String::new(),
            Self::Html { content } => content.clone(),
        }
    }
}

/// An inline element within a block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineElement {
    /// Plain text
    Text { value: String },
    /// Bold text (**text**)
    Strong { value: String },
    /// Italic text (*text*)
    Emphasis { value: String },
    /// Inline code (`code`)
    Code { value: String },
    /// Strikethrough text (~~text~~)
    Strikethrough { value: String },
    /// A link [text](url), with `text` already flattened to plain text
    Link {
        text: String,
        url: String,
        title: Option<String>,
    },
    /// An inline image ![alt](src)
    Image {
        alt: String,
        src: String,
        title: Option<String>,
    },
    /// Inline HTML or other opaque passthrough content
    Html { value: String },
}

impl InlineElement {
    /// Extract the visible text content.
    ///
    /// For links this is the link text (not the URL); for images the alt text.
    #[must_use]
    pub fn to_plain_text(&self) -> &str {
        match self {
            Self::Text { value }
            | Self::Strong { value }
            | Self::Emphasis { value }
            | Self::Code { value }
            | Self::Strikethrough { value }
            | Self::Html { value } => value,
            Self::Link { text, .. } => text,
            Self::Image { alt, .. } => alt,
        }
    }
}

/// A list item: a run of inline children plus any nested blocks
/// (sub-lists, code blocks) that appeared inside the item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListItem {
    pub inline: Vec<InlineElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<ContentBlock>,
}

impl ListItem {
    /// Extract the visible text content, including nested blocks.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut result = String::new();
        for elem in &self.inline {
            result.push_str(elem.to_plain_text());
        }
        for block in &self.blocks {
            if !result.is_empty() && !result.ends_with('\n') {
                result.push('\n');
            }
            result.push_str(&block.to_plain_text());
        }
        result
    }
}
