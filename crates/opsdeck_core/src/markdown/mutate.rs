//! Line-addressed document mutation.
//!
//! # Responsibility
//! - Apply one checkbox toggle to a full document by line reference.
//! - Reject stale, out-of-range or non-checkbox targets before writing.
//!
//! # Invariants
//! - Only the addressed line changes; every other line is kept verbatim.
//! - Output lines are joined with `\n`. `\r\n` input endings are not kept.
//! - No partial result is produced on rejection.

use crate::markdown::checkbox::{is_checked_line, toggle_checkbox_line};
use crate::model::snapshot::{DocumentSnapshot, LineRef, Revision};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Declined line mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The line index is past the end of the document.
    LineOutOfRange {
        line_number: usize,
        line_count: usize,
    },
    /// The addressed line is not checkbox-shaped.
    NotACheckbox { line_number: usize },
    /// The reference was taken from another document version.
    StaleReference { expected: Revision, actual: Revision },
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineOutOfRange {
                line_number,
                line_count,
            } => write!(
                f,
                "line {line_number} out of range for document with {line_count} lines"
            ),
            Self::NotACheckbox { line_number } => {
                write!(f, "line {line_number} is not a checkbox task")
            }
            Self::StaleReference { expected, actual } => write!(
                f,
                "line reference targets revision {expected} but document is at {actual}"
            ),
        }
    }
}

impl Error for MutationError {}

/// Result of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Full rewritten document text.
    pub content: String,
    pub line_number: usize,
    /// Done state of the rewritten line.
    pub done: bool,
    /// Revision of `content`.
    pub revision: Revision,
}

/// Toggles the checkbox at `line_ref` inside `text`.
///
/// # Errors
/// - `StaleReference` when a pinned reference does not match `text`.
/// - `LineOutOfRange` when the index is past the last line.
/// - `NotACheckbox` when the addressed line is not checkbox-shaped.
pub fn toggle_task_line(text: &str, line_ref: &LineRef) -> Result<ToggleOutcome, MutationError> {
    let mut snapshot = DocumentSnapshot::parse(text);
    if let Some(expected) = &line_ref.revision {
        if !snapshot.accepts(line_ref) {
            return Err(MutationError::StaleReference {
                expected: expected.clone(),
                actual: snapshot.revision().clone(),
            });
        }
    }

    let line_number = line_ref.line_number;
    let line_count = snapshot.line_count();
    let line = snapshot
        .lines_mut()
        .get_mut(line_number)
        .ok_or(MutationError::LineOutOfRange {
            line_number,
            line_count,
        })?;

    let updated =
        toggle_checkbox_line(line).ok_or(MutationError::NotACheckbox { line_number })?;
    let done = is_checked_line(&updated);
    *line = updated;

    let content = snapshot.to_text();
    let revision = Revision::of(&content);
    Ok(ToggleOutcome {
        content,
        line_number,
        done,
        revision,
    })
}
