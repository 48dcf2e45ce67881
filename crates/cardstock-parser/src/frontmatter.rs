//! Fenced key-value header parsing: `---\nkey: value\n---`
//!
//! Not a YAML processor. The header format supports scalar
//! string values and a single flat list field (`tags`). Lines the grammar
//! does not recognize are skipped, and a missing or unterminated fence
//! degrades to "no header" with the body left untouched.

use cardstock_core::HeaderFields;
use regex::Regex;
use std::sync::LazyLock;

/// Fence marker opening and closing the header block.
const FENCE: &str = "---";

/// Matches one `key: value` header line.
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)\s*:\s*(.*)$").unwrap());

/// A raw source split into recognized header fields and the markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub header: HeaderFields,
    pub body: String,
}

impl Parsed {
    fn headerless(raw: &str) -> Self {
        Self {
            header: HeaderFields::default(),
            body: raw.to_string(),
        }
    }
}

/// Split a raw text blob into header fields and body.
///
/// Never fails: inputs without an opening fence, or with an unterminated
/// header block, come back with an empty header and the original text as
/// the body.
///
/// # Example
/// ```
/// use cardstock_parser::frontmatter::parse;
///
/// let parsed = parse("---\ntitle: Hello\ntags: [a, b]\n---\n\nBody");
/// assert_eq!(parsed.header.title.as_deref(), Some("Hello"));
/// assert_eq!(parsed.header.tags, vec!["a", "b"]);
/// assert_eq!(parsed.body, "Body");
/// ```
pub fn parse(raw: &str) -> Parsed {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with(FENCE) {
        return Parsed::headerless(raw);
    }

    // Closing fence must be preceded by a newline, searched past the opener.
    // An unterminated header must not swallow the document.
    let after_open = &trimmed[FENCE.len()..];
    let Some(close_at) = after_open.find("\n---") else {
        return Parsed::headerless(raw);
    };

    let header_block = &after_open[..close_at];
    let mut body = &after_open[close_at + 1 + FENCE.len()..];

    // Drop the newline terminating the fence line, then one blank line.
    if let Some(rest) = body.strip_prefix('\n') {
        body = rest.strip_prefix('\n').unwrap_or(rest);
    }

    Parsed {
        header: parse_header_block(header_block),
        body: body.to_string(),
    }
}

/// Parse the text between the fences into recognized fields.
fn parse_header_block(block: &str) -> HeaderFields {
    let mut header = HeaderFields::default();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(caps) = HEADER_LINE.captures(line) else {
            log::debug!("skipping unrecognized header line: {line}");
            continue;
        };
        let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = unquote(caps.get(2).map(|m| m.as_str()).unwrap_or_default().trim());

        match key {
            "title" => header.title = Some(value.to_string()),
            "date" => header.date = Some(value.to_string()),
            "description" => header.description = Some(value.to_string()),
            "tags" => header.tags = parse_tags(value),
            _ => {}
        }
    }

    header
}

/// Parse a tags value: bracket form `[a, "b c", 'd']` or bare form `a, b`.
///
/// Elements are trimmed, unquoted one layer, and empties dropped, so
/// `[]` yields an empty list rather than one empty element.
fn parse_tags(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    inner
        .split(',')
        .map(str::trim)
        .map(unquote)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip one layer of matching double or single quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstock_core::HeaderFields;

    #[test]
    fn test_no_opening_fence_returns_input_unchanged() {
        let raw = "Just content\nNo header here";
        let parsed = parse(raw);
        assert!(parsed.header.is_empty());
        assert_eq!(parsed.body, raw);
    }

    #[test]
    fn test_unterminated_fence_returns_input_unchanged() {
        let raw = "---\ntitle: Oops\nno closing fence";
        let parsed = parse(raw);
        assert!(parsed.header.is_empty());
        assert_eq!(parsed.body, raw);
    }

    #[test]
    fn test_basic_header_and_body() {
        let parsed = parse("---\ntitle: Hello\ndate: 2024-01-02\n---\n\nBody text");
        assert_eq!(parsed.header.title.as_deref(), Some("Hello"));
        assert_eq!(parsed.header.date.as_deref(), Some("2024-01-02"));
        assert_eq!(parsed.body, "Body text");
    }

    #[test]
    fn test_body_without_blank_line() {
        let parsed = parse("---\ntitle: T\n---\nBody");
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_only_one_blank_line_stripped() {
        let parsed = parse("---\ntitle: T\n---\n\n\nBody");
        assert_eq!(parsed.body, "\nBody");
    }

    #[test]
    fn test_leading_whitespace_before_fence() {
        let parsed = parse("\n\n  ---\ntitle: T\n---\nBody");
        assert_eq!(parsed.header.title.as_deref(), Some("T"));
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_quoted_values_unwrapped_once() {
        let parsed = parse("---\ntitle: \"Quoted Title\"\ndescription: 'single'\n---\n");
        assert_eq!(parsed.header.title.as_deref(), Some("Quoted Title"));
        assert_eq!(parsed.header.description.as_deref(), Some("single"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let parsed = parse("---\ntitle: T\nauthor: nobody\nlayout: wide\n---\n");
        assert_eq!(parsed.header.title.as_deref(), Some("T"));
        assert!(parsed.header.description.is_none());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let parsed = parse("---\n!!! not a field\ntitle: T\n:::\n---\n");
        assert_eq!(parsed.header.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_tags_bracket_form() {
        let parsed = parse("---\ntags: [a, \"b c\", 'd']\n---\n");
        assert_eq!(parsed.header.tags, vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_tags_empty_brackets() {
        let parsed = parse("---\ntags: []\n---\n");
        assert!(parsed.header.tags.is_empty());
    }

    #[test]
    fn test_tags_bare_comma_form() {
        let parsed = parse("---\ntags: a, b\n---\n");
        assert_eq!(parsed.header.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_tags_drops_empty_elements() {
        let parsed = parse("---\ntags: [a, , b,]\n---\n");
        assert_eq!(parsed.header.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_body_after_header() {
        let parsed = parse("---\ntitle: T\n---\n");
        assert_eq!(parsed.header.title.as_deref(), Some("T"));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_round_trip_through_header_block() {
        let header = HeaderFields {
            title: Some("A Title".to_string()),
            date: Some("2023-11-05".to_string()),
            description: Some("what it is about".to_string()),
            tags: vec!["rust".to_string(), "two words".to_string()],
        };
        let body = "First line\n\nSecond paragraph";
        let raw = header.to_block(body);

        let parsed = parse(&raw);
        assert_eq!(parsed.header, header);
        assert_eq!(parsed.body, body);
    }
}
