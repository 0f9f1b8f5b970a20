//! Checkbox task record.

use serde::{Deserialize, Serialize};

/// One checkbox line projected from a document.
///
/// Serialized with camelCase field names to match the dashboard wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Trimmed text after the checkbox marker.
    pub text: String,
    /// `true` only for `x`/`X` markers. In-progress (`/`) counts as open.
    pub done: bool,
    /// 0-based line index at parse time.
    ///
    /// Valid only against the exact document text it was parsed from. Use
    /// [`crate::DocumentSnapshot::line_ref`] to pin it to a revision.
    pub line_number: usize,
}

impl Task {
    pub fn new(text: impl Into<String>, done: bool, line_number: usize) -> Self {
        Self {
            text: text.into(),
            done,
            line_number,
        }
    }
}
