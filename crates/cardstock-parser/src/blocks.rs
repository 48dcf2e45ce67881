//! Markdown body parsing into the typed block tree.
//!
//! Built on `pulldown-cmark`. The event stream is folded into
//! [`ContentBlock`]/[`InlineElement`] values so downstream consumers match
//! on a closed set of node kinds instead of re-walking markdown text.
//!
//! Inline formatting containers (strong, emphasis, strikethrough, link
//! text, image alt) are flattened to plain strings; block containers
//! (blockquotes, list items) keep their tree structure. Raw HTML is
//! carried through opaquely.

use cardstock_core::{ContentBlock, InlineElement, ListItem};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Parse a markdown body into its block-level tree.
///
/// # Example
/// ```
/// use cardstock_parser::parse_blocks;
/// use cardstock_core::ContentBlock;
///
/// let blocks = parse_blocks("# Title\n\nSome prose.");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], ContentBlock::Heading { level: 1, .. }));
/// ```
pub fn parse_blocks(markdown: &str) -> Vec<ContentBlock> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut events = Parser::new_ext(markdown, opts);
    collect_blocks(&mut events, None)
}

/// Collect block-level nodes until the given end tag (or end of stream).
fn collect_blocks<'a, I>(events: &mut I, until: Option<TagEnd>) -> Vec<ContentBlock>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut blocks = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::End(end) if Some(end) == until => break,
            Event::Start(Tag::Paragraph) => blocks.push(ContentBlock::Paragraph {
                inline: collect_inline(events, TagEnd::Paragraph),
            }),
            Event::Start(Tag::Heading { level, .. }) => blocks.push(ContentBlock::Heading {
                level: heading_level(level),
                inline: collect_inline(events, TagEnd::Heading(level)),
            }),
            Event::Start(Tag::CodeBlock(kind)) => blocks.push(collect_code(events, kind)),
            Event::Start(Tag::List(start)) => blocks.push(ContentBlock::List {
                ordered: start.is_some(),
                items: collect_items(events),
            }),
            Event::Start(Tag::BlockQuote(kind)) => blocks.push(ContentBlock::Blockquote {
                blocks: collect_blocks(events, Some(TagEnd::BlockQuote(kind))),
            }),
            Event::Start(Tag::HtmlBlock) => blocks.push(collect_html_block(events)),
            Event::Rule => blocks.push(ContentBlock::Rule),
            _ => {}
        }
    }

    blocks
}

/// Collect inline elements until the given end tag.
fn collect_inline<'a, I>(events: &mut I, until: TagEnd) -> Vec<InlineElement>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut inline = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::End(end) if end == until => break,
            other => {
                try_inline(other, events, &mut inline);
            }
        }
    }

    inline
}

/// Handle one inline-level event, appending to `sink`.
///
/// Returns the event back when it is not inline content, so block-level
/// callers (list items) can dispatch it themselves.
fn try_inline<'a, I>(
    event: Event<'a>,
    events: &mut I,
    sink: &mut Vec<InlineElement>,
) -> Option<Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
{
    match event {
        Event::Text(text) => push_text(sink, &text),
        Event::Code(value) => sink.push(InlineElement::Code {
            value: value.to_string(),
        }),
        Event::InlineHtml(value) => sink.push(InlineElement::Html {
            value: value.to_string(),
        }),
        Event::SoftBreak => push_text(sink, " "),
        Event::HardBreak => push_text(sink, "\n"),
        Event::Start(Tag::Strong) => {
            let value = collect_plain(events, TagEnd::Strong);
            sink.push(InlineElement::Strong { value });
        }
        Event::Start(Tag::Emphasis) => {
            let value = collect_plain(events, TagEnd::Emphasis);
            sink.push(InlineElement::Emphasis { value });
        }
        Event::Start(Tag::Strikethrough) => {
            let value = collect_plain(events, TagEnd::Strikethrough);
            sink.push(InlineElement::Strikethrough { value });
        }
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) => {
            let text = collect_plain(events, TagEnd::Link);
            sink.push(InlineElement::Link {
                text,
                url: dest_url.to_string(),
                title: non_empty(&title),
            });
        }
        Event::Start(Tag::Image {
            dest_url, title, ..
        }) => {
            let alt = collect_plain(events, TagEnd::Image);
            sink.push(InlineElement::Image {
                alt,
                src: dest_url.to_string(),
                title: non_empty(&title),
            });
        }
        other => return Some(other),
    }
    None
}

/// Flatten everything up to the matching end tag into plain text.
fn collect_plain<'a, I>(events: &mut I, until: TagEnd) -> String
where
    I: Iterator<Item = Event<'a>>,
{
    let mut out = String::new();
    let mut depth = 0usize;

    while let Some(event) = events.next() {
        match event {
            Event::Start(tag) => {
                if tag.to_end() == until {
                    depth += 1;
                }
            }
            Event::End(end) if end == until => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::End(_) => {}
            Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) => {
                out.push_str(&text);
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    out
}

/// Collect the items of a list until its end tag.
fn collect_items<'a, I>(events: &mut I) -> Vec<ListItem>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut items = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::End(TagEnd::List(_)) => break,
            Event::Start(Tag::Item) => items.push(collect_item(events)),
            _ => {}
        }
    }

    items
}

/// Collect one list item: an inline run plus any nested blocks.
fn collect_item<'a, I>(events: &mut I) -> ListItem
where
    I: Iterator<Item = Event<'a>>,
{
    let mut item = ListItem::default();

    while let Some(event) = events.next() {
        let Some(event) = try_inline(event, events, &mut item.inline) else {
            continue;
        };
        match event {
            Event::End(TagEnd::Item) => break,
            // Loose items wrap their lead content in a paragraph; fold the
            // first one into the item's inline run so tight and loose lists
            // present the same shape.
            Event::Start(Tag::Paragraph) => {
                let inline = collect_inline(events, TagEnd::Paragraph);
                if item.inline.is_empty() && item.blocks.is_empty() {
                    item.inline = inline;
                } else {
                    item.blocks.push(ContentBlock::Paragraph { inline });
                }
            }
            Event::Start(Tag::List(start)) => item.blocks.push(ContentBlock::List {
                ordered: start.is_some(),
                items: collect_items(events),
            }),
            Event::Start(Tag::CodeBlock(kind)) => item.blocks.push(collect_code(events, kind)),
            Event::Start(Tag::BlockQuote(kind)) => item.blocks.push(ContentBlock::Blockquote {
                blocks: collect_blocks(events, Some(TagEnd::BlockQuote(kind))),
            }),
            Event::Start(Tag::HtmlBlock) => item.blocks.push(collect_html_block(events)),
            _ => {}
        }
    }

    item
}

/// Collect a code block's text content.
fn collect_code<'a, I>(events: &mut I, kind: CodeBlockKind<'a>) -> ContentBlock
where
    I: Iterator<Item = Event<'a>>,
{
    let language = match kind {
        CodeBlockKind::Fenced(info) => {
            let lang = info.split_whitespace().next().unwrap_or_default();
            (!lang.is_empty()).then(|| lang.to_string())
        }
        CodeBlockKind::Indented => None,
    };

    let mut content = String::new();
    while let Some(event) = events.next() {
        match event {
            Event::End(TagEnd::CodeBlock) => break,
            Event::Text(text) => content.push_str(&text),
            _ => {}
        }
    }

    ContentBlock::Code { language, content }
}

/// Collect a raw HTML block verbatim.
fn collect_html_block<'a, I>(events: &mut I) -> ContentBlock
where
    I: Iterator<Item = Event<'a>>,
{
    let mut content = String::new();
    while let Some(event) = events.next() {
        match event {
            Event::End(TagEnd::HtmlBlock) => break,
            Event::Html(text) | Event::Text(text) => content.push_str(&text),
            _ => {}
        }
    }

    ContentBlock::Html { content }
}

/// Append text, merging with a trailing text element.
fn push_text(sink: &mut Vec<InlineElement>, text: &str) {
    if let Some(InlineElement::Text { value }) = sink.last_mut() {
        value.push_str(text);
    } else {
        sink.push(InlineElement::Text {
            value: text.to_string(),
        });
    }
}

fn heading_level(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_with_sole_link() {
        let blocks = parse_blocks("[Title](https://x.com)");
        assert_eq!(blocks.len(), 1);
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inline.len(), 1);
        assert_eq!(
            inline[0],
            InlineElement::Link {
                text: "Title".to_string(),
                url: "https://x.com".to_string(),
                title: None,
            }
        );
    }

    #[test]
    fn test_paragraph_with_link_and_text() {
        let blocks = parse_blocks("See [here](https://x.com) for more");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inline.len(), 3);
        assert!(matches!(inline[0], InlineElement::Text { .. }));
        assert!(matches!(inline[1], InlineElement::Link { .. }));
        assert!(matches!(inline[2], InlineElement::Text { .. }));
    }

    #[test]
    fn test_bare_url_stays_a_text_node() {
        let blocks = parse_blocks("https://example.com/page");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inline.as_slice(),
            [InlineElement::Text {
                value: "https://example.com/page".to_string()
            }]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse_blocks("# One\n\n### Three");
        assert!(matches!(blocks[0], ContentBlock::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], ContentBlock::Heading { level: 3, .. }));
    }

    #[test]
    fn test_fenced_code_block_language() {
        let blocks = parse_blocks("```rust\nfn main() {}\n```");
        assert_eq!(
            blocks[0],
            ContentBlock::Code {
                language: Some("rust".to_string()),
                content: "fn main() {}\n".to_string(),
            }
        );
    }

    #[test]
    fn test_tight_list_item_link_then_text() {
        let blocks = parse_blocks("- [Title](https://x.com) — a description");
        let ContentBlock::List { ordered, items } = &blocks[0] else {
            panic!("expected list");
        };
        assert!(!ordered);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].inline.len(), 2);
        assert!(matches!(items[0].inline[0], InlineElement::Link { .. }));
        assert_eq!(
            items[0].inline[1],
            InlineElement::Text {
                value: " — a description".to_string()
            }
        );
    }

    #[test]
    fn test_loose_list_folds_first_paragraph() {
        let blocks = parse_blocks("- [A](https://a.com)\n\n- [B](https://b.com)\n");
        let ContentBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item.inline.len(), 1);
            assert!(matches!(item.inline[0], InlineElement::Link { .. }));
            assert!(item.blocks.is_empty());
        }
    }

    #[test]
    fn test_nested_list_goes_to_item_blocks() {
        let blocks = parse_blocks("- outer\n  - inner\n");
        let ContentBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].to_plain_text(), "outer\ninner");
        assert!(matches!(items[0].blocks[0], ContentBlock::List { .. }));
    }

    #[test]
    fn test_ordered_list() {
        let blocks = parse_blocks("1. one\n2. two\n");
        assert!(matches!(
            blocks[0],
            ContentBlock::List { ordered: true, .. }
        ));
    }

    #[test]
    fn test_blockquote_contains_blocks() {
        let blocks = parse_blocks("> quoted text\n");
        let ContentBlock::Blockquote { blocks: inner } = &blocks[0] else {
            panic!("expected blockquote");
        };
        assert!(matches!(inner[0], ContentBlock::Paragraph { .. }));
    }

    #[test]
    fn test_rule() {
        let blocks = parse_blocks("above\n\n---\n\nbelow");
        assert!(matches!(blocks[1], ContentBlock::Rule));
    }

    #[test]
    fn test_strong_and_emphasis_flattened() {
        let blocks = parse_blocks("**bold** and *soft*");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inline[0],
            InlineElement::Strong {
                value: "bold".to_string()
            }
        );
        assert_eq!(
            inline[2],
            InlineElement::Emphasis {
                value: "soft".to_string()
            }
        );
    }

    #[test]
    fn test_strikethrough_enabled() {
        let blocks = parse_blocks("~~gone~~");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inline[0],
            InlineElement::Strikethrough {
                value: "gone".to_string()
            }
        );
    }

    #[test]
    fn test_link_with_nested_formatting_flattens_text() {
        let blocks = parse_blocks("[**Bold** title](https://x.com)");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inline[0],
            InlineElement::Link {
                text: "Bold title".to_string(),
                url: "https://x.com".to_string(),
                title: None,
            }
        );
    }

    #[test]
    fn test_html_block_passthrough() {
        let blocks = parse_blocks("<div class=\"x\">\nraw\n</div>\n");
        assert!(matches!(blocks[0], ContentBlock::Html { .. }));
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let blocks = parse_blocks("line one\nline two");
        let ContentBlock::Paragraph { inline } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inline.as_slice(),
            [InlineElement::Text {
                value: "line one line two".to_string()
            }]
        );
    }
}
