//! Derived fields computed from a post body: reading time, excerpt and the
//! heading outline used for in-page navigation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Average adult reading speed
pub const DEFAULT_WORDS_PER_MINUTE: usize = 238;

pub const DEFAULT_EXCERPT_LENGTH: usize = 160;

pub const ELLIPSIS: char = '…';

lazy_static! {
    static ref CODE_RE: Regex = Regex::new(r"(?s)`{1,3}.*?`{1,3}").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\([^)]+\)").unwrap();
    static ref HEADING_MARK_RE: Regex = Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*|__").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"[*_]").unwrap();
    static ref BLOCKQUOTE_RE: Regex = Regex::new(r"(?m)^[ \t]*(?:>[ \t]?)+").unwrap();
    static ref NEWLINES_RE: Regex = Regex::new(r"(?:\r?\n)+").unwrap();
    static ref HEADING_LINE_RE: Regex = Regex::new(r"^(#{1,6})[ \t]+(.+)$").unwrap();
    static ref HEADING_ATTRS_RE: Regex = Regex::new(r"[ \t]*\{([^{}]*)\}[ \t]*$").unwrap();
    static ref CLOSING_HASHES_RE: Regex = Regex::new(r"(?:^|[ \t]+)#+[ \t]*$").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS_RE: Regex = Regex::new(r"-+").unwrap();
}

/// A section heading in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Reading time label, e.g. `"3 min read"`. Blank input is `"0 min read"`.
pub fn estimate_read_time(body: &str, words_per_minute: usize) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1));
    format!("{} min read", minutes)
}

/// Plain-text excerpt of a markdown body.
///
/// Markup is stripped (code spans and fences, images, link syntax, heading
/// and blockquote markers, emphasis) and line breaks become spaces. Text
/// longer than `max_length` characters is cut back to the last whole word
/// and suffixed with [`ELLIPSIS`].
pub fn derive_excerpt(body: &str, max_length: usize) -> String {
    let text = CODE_RE.replace_all(body, "");
    let text = IMAGE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HEADING_MARK_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "");
    let text = ITALIC_RE.replace_all(&text, "");
    let text = BLOCKQUOTE_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");

    truncate_words(text.trim(), max_length)
}

fn truncate_words(text: &str, max_length: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_length) else {
        return text.to_string();
    };

    let head = &text[..cut];
    // a cut landing on whitespace already ends on a whole word
    let head = if text[cut..].starts_with(char::is_whitespace) {
        head
    } else {
        head.rfind(char::is_whitespace).map_or(head, |i| &head[..i])
    };

    format!("{}{}", head.trim_end(), ELLIPSIS)
}

/// Extract `#`-style headings outside fenced code blocks.
///
/// Ids match the ones [`MarkdownRenderer`](super::MarkdownRenderer) puts on
/// the rendered headings: a trailing `{#id}` attribute block wins, otherwise
/// the id is slugged from the heading's visible text.
pub fn extract_headings(body: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence: Option<(char, usize)> = None;

    for line in body.lines() {
        if let Some((marker, len)) = fence {
            if closes_fence(line, marker, len) {
                fence = None;
            }
            continue;
        }
        if let Some(opening) = fence_marker(line) {
            fence = Some(opening);
            continue;
        }

        let Some(caps) = HEADING_LINE_RE.captures(line) else {
            continue;
        };
        let (raw, explicit_id) = split_heading_attrs(&caps[2]);
        let text = strip_inline_markers(raw);
        if text.is_empty() {
            continue;
        }

        headings.push(Heading {
            id: explicit_id.unwrap_or_else(|| heading_id(&text)),
            level: caps[1].len() as u8,
            text,
        });
    }

    headings
}

/// Opening fence: three or more backticks or tildes
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

/// A fence closes on a bare run of the same character, at least as long
fn closes_fence(line: &str, marker: char, len: usize) -> bool {
    let trimmed = line.trim();
    let run = trimmed.chars().take_while(|c| *c == marker).count();
    run >= len && run == trimmed.chars().count()
}

/// Split a trailing `{#id .class}` block and closing `#`s off heading text
fn split_heading_attrs(text: &str) -> (&str, Option<String>) {
    let (text, id) = match HEADING_ATTRS_RE.captures(text) {
        Some(caps) => {
            let id = caps[1]
                .split_whitespace()
                .rev()
                .find_map(|attr| attr.strip_prefix('#').filter(|id| !id.is_empty()))
                .map(str::to_string);
            (&text[..caps.get(0).map_or(text.len(), |m| m.start())], id)
        }
        None => (text, None),
    };

    let text = match CLOSING_HASHES_RE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    (text, id)
}

/// Reduce heading markdown to its visible text: images become their alt
/// text, links their label, and bold and code markers are dropped.
pub fn strip_inline_markers(text: &str) -> String {
    let text = IMAGE_RE.replace_all(text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    text.replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

/// Anchor id for a heading: lowercase ASCII alphanumerics with runs of
/// whitespace and hyphens collapsed to single hyphens.
pub fn heading_id(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let hyphenated = WHITESPACE_RE.replace_all(kept.trim(), "-");
    HYPHENS_RE
        .replace_all(&hyphenated, "-")
        .trim_matches('-')
        .to_string()
}
