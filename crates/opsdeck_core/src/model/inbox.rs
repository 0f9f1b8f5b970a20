//! Inbox note record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One captured inbox note.
///
/// `id` is regenerated on every parse and must not be stored or used to
/// address the note later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxItem {
    pub id: String,
    pub text: String,
    /// `YYYY-MM-DD` prefix when present, empty string otherwise.
    pub date: String,
}

impl InboxItem {
    /// Creates an item with a freshly generated identifier.
    pub fn new(text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            date: date.into(),
        }
    }

    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }
}
