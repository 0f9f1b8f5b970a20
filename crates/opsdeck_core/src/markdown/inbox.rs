//! Inbox documents: one freeform note per `- ` line.

use crate::model::inbox::InboxItem;
use crate::model::snapshot::split_lines;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static INBOX_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-\s*(?:\[([0-9]{4}-[0-9]{2}-[0-9]{2})\]\s*)?(.+)$")
        .expect("valid inbox line regex")
});

/// Default first line written into a freshly created inbox document.
pub const DEFAULT_INBOX_HEADER: &str = "# Inbox";

/// Parses inbox lines of the form `- [YYYY-MM-DD] text` (date optional).
///
/// Lines whose text is empty after trimming are skipped. Duplicates are kept.
/// Each item gets a new identifier on every call.
pub fn parse_inbox(text: &str) -> Vec<InboxItem> {
    split_lines(text)
        .filter_map(|line| {
            let caps = INBOX_LINE_RE.captures(line)?;
            let body = caps.get(2)?.as_str().trim();
            if body.is_empty() {
                return None;
            }
            let date = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            Some(InboxItem::new(body, date))
        })
        .collect()
}

/// Renders the dated line appended for one captured note.
pub fn format_inbox_line(text: &str, date: NaiveDate) -> String {
    format!("- [{}] {}", date.format("%Y-%m-%d"), text)
}

/// Returns the initial content of an empty inbox document.
pub fn empty_inbox_document(header: &str) -> String {
    format!("{header}\n\n")
}

/// Appends a dated note to an inbox document.
///
/// Returns `None` when `text` is blank. A blank document is rebuilt from
/// `header`; otherwise surrounding whitespace of the existing document is
/// trimmed before the new line is added. The result always ends with `\n`.
pub fn append_inbox_entry(
    existing: &str,
    text: &str,
    date: NaiveDate,
    header: &str,
) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let line = format_inbox_line(text, date);
    let existing = existing.trim();
    if existing.is_empty() {
        Some(format!("{header}\n\n{line}\n"))
    } else {
        Some(format!("{existing}\n{line}\n"))
    }
}
