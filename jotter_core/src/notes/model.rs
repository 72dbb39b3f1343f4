// Note and folder records plus the list logic behind the tool surface
// Dates are the ISO-8601 strings JSON.stringify(Date) emits

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSummary {
    /// Note ID (use for get/update/delete operations)
    pub id: String,
    /// Note title (first line of the body)
    pub title: String,
    /// Creation date
    pub created: String,
    /// Last modification date
    pub modified: String,
    /// Containing folder name
    pub folder: String,
    /// Account name (e.g., "iCloud", "On My Mac")
    pub account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note ID
    pub id: String,
    /// Note title
    pub title: String,
    /// Full note body as plain text
    pub body: String,
    /// Creation date
    pub created: String,
    /// Last modification date
    pub modified: String,
    /// Containing folder name
    pub folder: String,
    /// Account name
    pub account: String,
    /// Whether the body was cut at the length cap
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Folder ID
    pub id: String,
    /// Folder name
    pub name: String,
    /// Owning account name
    pub account: String,
    /// Number of notes in the folder
    pub note_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Note ID
    pub id: String,
    /// Note title
    pub title: String,
    /// Creation date
    pub created: String,
    /// Last modification date
    pub modified: String,
    /// Containing folder name
    pub folder: String,
    /// Account name
    pub account: String,
    /// Body context around the first match
    pub snippet: String,
}

fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Newest first; unparseable dates sort last, compared lexically among
/// themselves.
pub fn compare_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}

pub fn sort_newest_first(notes: &mut [NoteSummary]) {
    notes.sort_by(|x, y| {
        compare_dates_desc(&x.modified, &y.modified).then_with(|| x.title.cmp(&y.title))
    });
}

pub fn sort_hits_newest_first(hits: &mut [SearchHit]) {
    hits.sort_by(|x, y| {
        compare_dates_desc(&x.modified, &y.modified).then_with(|| x.title.cmp(&y.title))
    });
}

/// Resolve a caller-supplied limit against the configured default and cap.
pub fn clamp_limit(requested: Option<u64>, default: usize, max: usize) -> usize {
    match requested {
        Some(n) => n.min(max as u64) as usize,
        None => default.min(max),
    }
}

/// Case-insensitive substring match over title or body.
pub fn matches_query(title: &str, body: &str, query: &str) -> bool {
    let needle = query.to_lowercase();
    title.to_lowercase().contains(&needle) || body.to_lowercase().contains(&needle)
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalized context around the first case-insensitive match,
/// `radius` bytes to either side, cut on character boundaries. Falls back to
/// the start of the body when the query does not occur (title-only matches).
pub fn snippet_around(body: &str, query: &str, radius: usize) -> String {
    let lowered = body.to_lowercase();
    let needle = query.to_lowercase();

    let (match_start, match_end) = match lowered.find(&needle) {
        Some(at) => (
            original_offset(body, at),
            original_offset(body, at + needle.len()),
        ),
        None => (0, 0),
    };

    let start = floor_char_boundary(body, match_start.saturating_sub(radius));
    let end = ceil_char_boundary(body, match_end.saturating_add(radius));

    let mut snippet = normalize_whitespace(&body[start..end]);
    if start > 0 {
        snippet.insert_str(0, "...");
    }
    if end < body.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Map a byte offset in `body.to_lowercase()` back to the start of the
/// original character covering it. Case folding can change byte lengths
/// (one character may lowercase to several), so lowered offsets cannot
/// index the original directly.
fn original_offset(body: &str, lowered_offset: usize) -> usize {
    let mut consumed = 0;
    for (at, ch) in body.char_indices() {
        let folded: usize = ch.to_lowercase().map(char::len_utf8).sum();
        if lowered_offset < consumed + folded {
            return at;
        }
        consumed += folded;
    }
    body.len()
}

/// Cut a body at `max_chars` characters. Counts characters rather than
/// bytes, so multibyte text never splits mid-character.
pub fn truncate_body(body: &str, max_chars: usize) -> (String, bool) {
    if body.chars().count() <= max_chars {
        (body.to_string(), false)
    } else {
        (body.chars().take(max_chars).collect(), true)
    }
}
