//! JSDoc block parser — splits a `/** ... */` comment into classified tags.
//!
//! A tag starts at the beginning of a line (after the ` * ` gutter). Once
//! inside a tag, an `@name` preceded by whitespace and outside backticks
//! also starts a new one, so `@desc Kinds. @typedef` is two tags.
//! Classification follows the shapes the TypeScript compiler assigns:
//! `@typedef` owns the `@property`/`@prop` tags that follow it, tags with a
//! dedicated compiler shape are "other", and everything else is generic.

use crate::model::{DocBlock, DocTag, PropertyTag};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\*?[ \t]?").unwrap());

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(.*)$").unwrap());

/// Tags the TypeScript compiler parses into a dedicated node kind.
const SHAPED_TAGS: &[&str] = &[
    "augments", "extends", "implements", "author", "deprecated", "class",
    "constructor", "public", "private", "protected", "readonly", "override",
    "param", "arg", "argument", "return", "returns", "template", "type",
    "callback", "overload", "this", "enum", "see", "throws", "exception",
    "satisfies", "import", "property", "prop",
];

const PROPERTY_TAGS: &[&str] = &["property", "prop"];

// -- Public API ---------------------------------------------------------------

/// Whether a comment is a documentation block (`/** */`, not `/**/`).
pub fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && !text.starts_with("/**/")
}

/// Parse the text of a documentation comment into a [`DocBlock`].
pub fn parse_block(comment: &str) -> DocBlock {
    let raw = split_tags(strip_delimiters(comment));
    let mut tags = Vec::new();
    let mut raw = raw.into_iter().peekable();

    while let Some((name, text)) = raw.next() {
        if name == "typedef" {
            let mut properties = Vec::new();
            while let Some((_, text)) =
                raw.next_if(|(next, _)| PROPERTY_TAGS.contains(&next.as_str()))
            {
                properties.push(parse_property(&text));
            }
            tags.push(DocTag::Typedef { properties });
        } else if SHAPED_TAGS.contains(&name.as_str()) {
            tags.push(DocTag::Other { name });
        } else {
            tags.push(DocTag::Generic {
                name,
                comment: non_empty(&text),
            });
        }
    }

    DocBlock { tags }
}

// -- Block splitting ----------------------------------------------------------

fn strip_delimiters(comment: &str) -> &str {
    let inner = comment.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    inner.strip_suffix("*/").unwrap_or(inner)
}

/// Split the comment body into `(tag name, tag text)` pairs. Text before the
/// first tag is the block's free-form comment and is not needed here.
fn split_tags(body: &str) -> Vec<(String, String)> {
    let mut tags: Vec<(String, Vec<String>)> = Vec::new();

    for line in body.lines() {
        let line = RE_GUTTER.replace(line, "");
        let mut rest: &str = &line;
        if let Some(caps) = RE_TAG_LINE.captures(line.trim_start()) {
            tags.push((caps[1].to_string(), Vec::new()));
            rest = caps.get(2).map_or("", |m| m.as_str());
        }
        let Some((_, text)) = tags.last_mut() else {
            continue;
        };

        let starts = inline_tag_starts(rest);
        text.push(rest[..starts.first().copied().unwrap_or(rest.len())].to_string());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(rest.len());
            if let Some(caps) = RE_TAG_LINE.captures(&rest[start..end]) {
                tags.push((caps[1].to_string(), vec![caps[2].to_string()]));
            }
        }
    }

    tags.into_iter()
        .map(|(name, lines)| (name, lines.join("\n").trim().to_string()))
        .collect()
}

/// Byte offsets of `@name` tags inside a line of tag text.
fn inline_tag_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_code = false;
    let mut prev = None;
    for (i, c) in text.char_indices() {
        match c {
            '`' => in_code = !in_code,
            '@' if !in_code
                && prev.is_some_and(char::is_whitespace)
                && text[i + 1..].starts_with(|n: char| n.is_ascii_alphabetic()) =>
            {
                starts.push(i)
            }
            _ => {}
        }
        prev = Some(c);
    }
    starts
}

// -- @property ----------------------------------------------------------------

/// Parse `{Type} [name=default] comment`. Every part is optional.
fn parse_property(text: &str) -> PropertyTag {
    let mut rest = text.trim_start();

    let type_expression = if rest.starts_with('{') {
        let end = closing_brace(rest).unwrap_or(rest.len());
        let expr = &rest[..end];
        rest = rest[end..].trim_start();
        Some(expr.to_string())
    } else {
        None
    };

    let (name, bracketed, rest) = if let Some(inner) = rest.strip_prefix('[') {
        let close = inner.find(']').unwrap_or(inner.len());
        let name = inner[..close].split('=').next().unwrap_or("").trim();
        let after = inner.get(close + 1..).unwrap_or("");
        (name, true, after)
    } else {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        (&rest[..end], false, &rest[end..])
    };

    PropertyTag {
        name: non_empty(name),
        bracketed,
        type_expression,
        comment: non_empty(rest),
    }
}

/// Byte offset just past the brace matching the opening one at index 0.
fn closing_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
