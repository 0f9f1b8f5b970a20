//! Checkbox line recognition and toggling.
//!
//! A checkbox line is `- [<marker>] <text>` after optional indentation, where
//! `<marker>` is `x`/`X` (done), a space (open) or `/` (in progress, treated
//! as open). Marker matching is case-insensitive. A leading byte-order mark
//! is accepted and preserved by toggling.

use crate::model::task::Task;
use once_cell::sync::Lazy;
use regex::Regex;

static CHECKBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\x{FEFF}?\s*-\s*\[(x| |/)\]\s*(.+)$").expect("valid checkbox regex")
});
static TOGGLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\x{FEFF}?\s*-\s*\[)(x| |/)(\]\s*)(.*)$").expect("valid checkbox toggle regex")
});

/// Parses one line as a task at `line_number`.
///
/// Returns `None` for anything that is not checkbox-shaped, including a
/// checkbox with no text after the marker.
pub fn parse_checkbox(line: &str, line_number: usize) -> Option<Task> {
    let caps = CHECKBOX_RE.captures(line.trim())?;
    let marker = caps.get(1)?.as_str();
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(Task::new(text, is_done_marker(marker), line_number))
}

/// Flips the done state of one raw checkbox line.
///
/// Indentation, the `- [` prefix, the spacing after `]` and the trailing text
/// are preserved verbatim. `x`/`X` becomes a space; a space or `/` becomes
/// `x`, so an in-progress marker never survives a toggle.
///
/// Returns `None` when the line is not checkbox-shaped.
pub fn toggle_checkbox_line(line: &str) -> Option<String> {
    let caps = TOGGLE_RE.captures(line)?;
    let prefix = caps.get(1)?.as_str();
    let marker = caps.get(2)?.as_str();
    let close = caps.get(3)?.as_str();
    let rest = caps.get(4)?.as_str();
    let next = if is_done_marker(marker) { " " } else { "x" };
    Some(format!("{prefix}{next}{close}{rest}"))
}

/// Returns whether a raw line carries a done checkbox marker.
pub fn is_checked_line(line: &str) -> bool {
    TOGGLE_RE
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|marker| is_done_marker(marker.as_str()))
        .unwrap_or(false)
}

fn is_done_marker(marker: &str) -> bool {
    marker.eq_ignore_ascii_case("x")
}
