use std::collections::BTreeMap;

use log::{debug, warn};

/// One parsed blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub text: String, // Already cleaned of markup tags
    pub images: Vec<String>,
    pub author: String,
}

/// Entries keyed by their raw timestamp string.
///
/// Keys are ordered as strings, not as numbers: `"99"` sorts after `"100"`.
/// A later insert with the same key replaces the earlier entry.
pub type EntryCollection = BTreeMap<String, Entry>;

/// Open interval of Unix timestamps; both bounds are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: i64,
    pub to: i64,
}

impl DateRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from < timestamp && timestamp < self.to
    }

    /// Drops every entry whose key lies outside the range.
    ///
    /// Keys that are not integers (after trimming whitespace) are dropped too.
    pub fn retain_within(&self, entries: &mut EntryCollection) {
        entries.retain(|key, entry| match key.trim().parse::<i64>() {
            Ok(timestamp) if self.contains(timestamp) => true,
            Ok(_) => {
                debug!("Dropping '{}' ({}): outside date range", entry.title, key);
                false
            }
            Err(_) => {
                warn!("Dropping '{}': timestamp {:?} is not an integer", entry.title, key);
                false
            }
        });
    }
}

/// Command tokens that `[i]` and `[/i]` are rewritten to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub emphasis_start: String,
    pub emphasis_end: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            emphasis_start: r"\emph{".to_string(),
            emphasis_end: "}".to_string(),
        }
    }
}
