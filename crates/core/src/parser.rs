//! Parsing of pipe-delimited Flatpress records and cleanup of their body markup.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Entry, Markup};

/// Number of `|`-separated fields in a well-formed record.
pub const RECORD_FIELDS: usize = 11;

const TITLE_FIELD: usize = 3;
const TEXT_FIELD: usize = 5;
const AUTHOR_FIELD: usize = 7;
const TIMESTAMP_FIELD: usize = 9;

static JPG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\.jpg").expect("valid regex"));

static JPEG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+-\w+\.jpeg").expect("valid regex"));

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[img=[^\]]*\]").expect("valid regex"));

/// Splits a raw record into its timestamp key and entry.
///
/// Returns `None` when the record does not have exactly eleven fields or its
/// timestamp field is empty.
pub fn parse_entry(record: &str, markup: &Markup) -> Option<(String, Entry)> {
    let fields: Vec<&str> = record.split('|').collect();
    if fields.len() != RECORD_FIELDS || fields[TIMESTAMP_FIELD].is_empty() {
        return None;
    }

    let text = fields[TEXT_FIELD];
    let entry = Entry {
        title: fields[TITLE_FIELD].to_string(),
        images: extract_images(text),
        text: clean_text(text, markup),
        author: fields[AUTHOR_FIELD].to_string(),
    };
    Some((fields[TIMESTAMP_FIELD].to_string(), entry))
}

/// Finds image file names mentioned in a body.
///
/// All `.jpg` matches come first, then all hyphenated `.jpeg` matches.
pub fn extract_images(text: &str) -> Vec<String> {
    JPG_RE
        .find_iter(text)
        .chain(JPEG_RE.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Removes `[img=...]` tags, then rewrites italics.
pub fn clean_text(text: &str, markup: &Markup) -> String {
    let text = clean_img_pattern(text);
    replace_italic_symbols(&text, markup)
}

/// Deletes every `[img=...]` tag.
///
/// An empty result falls back to the untouched input, so a body made of a
/// single tag keeps that tag.
pub fn clean_img_pattern(text: &str) -> String {
    let cleaned = IMG_TAG_RE.replace_all(text, "");
    if cleaned.is_empty() {
        text.to_string()
    } else {
        cleaned.into_owned()
    }
}

pub fn replace_italic_symbols(text: &str, markup: &Markup) -> String {
    text.replace("[i]", &markup.emphasis_start)
        .replace("[/i]", &markup.emphasis_end)
}
