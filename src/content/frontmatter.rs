//! Front-matter parsing
//!
//! Posts open with a block fenced by `---` lines holding one `key: value`
//! pair per line. Values are coerced into a small set of scalar shapes rather
//! than full YAML, so any text is accepted: input that does not start with a
//! well-formed block is all body.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---(?:\r?\n(.*)|\z)").unwrap();
}

/// A single coerced front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Bool(bool),
    Number(f64),
    String(String),
    StringList(Vec<String>),
}

impl FrontMatterValue {
    /// Coerce a raw value: booleans, then numbers, then `[a, b]` lists,
    /// falling back to a string with one pair of surrounding quotes removed.
    pub fn coerce(raw: &str) -> Self {
        let raw = raw.trim();

        match raw {
            "true" => return FrontMatterValue::Bool(true),
            "false" => return FrontMatterValue::Bool(false),
            _ => {}
        }

        if let Some(n) = parse_number(raw) {
            return FrontMatterValue::Number(n);
        }

        if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| unquote(item.trim()).trim().to_string())
                .filter(|item| !item.is_empty())
                .collect();
            return FrontMatterValue::StringList(items);
        }

        FrontMatterValue::String(unquote(raw).to_string())
    }

    /// String view of a scalar; numbers and booleans are rendered as text.
    /// Lists have no string view.
    pub fn as_string(&self) -> Option<String> {
        match self {
            FrontMatterValue::String(s) => Some(s.clone()),
            FrontMatterValue::Number(n) => Some(n.to_string()),
            FrontMatterValue::Bool(b) => Some(b.to_string()),
            FrontMatterValue::StringList(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontMatterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontMatterValue::StringList(items) => Some(items),
            _ => None,
        }
    }
}

/// Numbers must be finite; `NaN` and `inf` stay strings.
fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Strip one matching pair of surrounding single or double quotes
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Front-matter data from a post, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    data: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(caps) = FRONT_MATTER_RE.captures(content) else {
            return (FrontMatter::default(), content);
        };

        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let mut data = IndexMap::new();
        for line in block.lines() {
            // lines without a colon are not key/value pairs
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            data.insert(key.to_string(), FrontMatterValue::coerce(value));
        }

        (FrontMatter { data }, body)
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.data.get(key)
    }

    /// Non-empty string value of `key`
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(FrontMatterValue::as_string)
            .filter(|s| !s.is_empty())
    }

    /// `true` only when `key` is the literal boolean `true`
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .and_then(FrontMatterValue::as_bool)
            .unwrap_or(false)
    }

    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(FrontMatterValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontMatterValue)> {
        self.data.iter()
    }
}
