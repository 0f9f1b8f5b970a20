//! Document snapshots and revision-pinned line references.
//!
//! # Responsibility
//! - Split raw document text into the line sequence used by every parser.
//! - Fingerprint the raw text so line offsets can be checked for staleness.
//!
//! # Invariants
//! - Reads accept `\n` and `\r\n`; writes always join with `\n`.
//! - A trailing newline survives a split/join cycle as a trailing empty line.
//! - A leading byte-order mark is hidden from parsers but kept in snapshots,
//!   so mutations write it back unchanged.
//! - `Revision` is derived from the exact raw text, so any edit (including
//!   line-ending normalization) produces a new revision.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};

/// Content fingerprint of one document text (SHA-256, lowercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn of(text: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(text.as_bytes())))
    }

    /// Wraps a revision string received from a caller.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Revision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to one line of one document version.
///
/// A pinned reference (`revision = Some`) is only honored against the same
/// document text it was taken from. An unpinned reference is a bare line
/// index and is trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRef {
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Revision>,
}

impl LineRef {
    pub fn pinned(line_number: usize, revision: Revision) -> Self {
        Self {
            line_number,
            revision: Some(revision),
        }
    }

    pub fn unpinned(line_number: usize) -> Self {
        Self {
            line_number,
            revision: None,
        }
    }
}

/// Immutable view of one document version as a line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    revision: Revision,
    lines: Vec<String>,
}

impl DocumentSnapshot {
    pub fn parse(text: &str) -> Self {
        Self {
            revision: Revision::of(text),
            lines: split_raw_lines(text).map(str::to_string).collect(),
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns a reference pinned to this snapshot, or `None` when out of range.
    pub fn line_ref(&self, line_number: usize) -> Option<LineRef> {
        if line_number < self.lines.len() {
            Some(LineRef::pinned(line_number, self.revision.clone()))
        } else {
            None
        }
    }

    /// Whether `line_ref` may be applied to this snapshot.
    pub fn accepts(&self, line_ref: &LineRef) -> bool {
        match &line_ref.revision {
            Some(revision) => revision == &self.revision,
            None => true,
        }
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [String] {
        &mut self.lines
    }

    /// Joins lines with `\n`, dropping any original `\r\n` endings.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// UTF-8 byte-order mark some Windows editors put in front of line 0.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Splits text on `\n` for parsing, tolerating a `\r` before each newline
/// and dropping one leading byte-order mark.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    split_raw_lines(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text))
}

fn split_raw_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
