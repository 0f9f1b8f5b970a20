//! Remote document store boundary.
//!
//! # Responsibility
//! - Define the flat-file database contract the dashboard reads and writes.
//! - Keep storage details out of parsing and assembly logic.
//!
//! # Invariants
//! - Stores move text verbatim; they never interpret document content.
//! - No concurrency control: a read followed by a write is last-write-wins.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod local;

pub use local::LocalFolderStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        id: String,
        source: std::io::Error,
    },
    NotFound(String),
    /// Identifier is malformed or escapes the store root.
    InvalidId(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { id, source } => write!(f, "store io failure for `{id}`: {source}"),
            Self::NotFound(id) => write!(f, "document not found: `{id}`"),
            Self::InvalidId(id) => write!(f, "invalid document id: `{id}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::InvalidId(_) => None,
        }
    }
}

/// Kind of a store entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One file or folder in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Store-specific opaque identifier.
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
}

/// Storage contract used by the dashboard service.
///
/// `""` identifies the root folder.
pub trait DocumentStore {
    /// Finds a direct child by exact name. `kind = None` matches either kind.
    fn find_child(
        &self,
        parent_id: &str,
        name: &str,
        kind: Option<EntryKind>,
    ) -> StoreResult<Option<StoreEntry>>;
    /// Lists direct children, sorted by name.
    fn list_children(&self, parent_id: &str) -> StoreResult<Vec<StoreEntry>>;
    fn read_text(&self, file_id: &str) -> StoreResult<String>;
    /// Replaces a file's content in full.
    fn write_text(&self, file_id: &str, content: &str) -> StoreResult<()>;
    fn create_file(&self, parent_id: &str, name: &str, content: &str) -> StoreResult<StoreEntry>;

    /// Walks `segments` from `root_id`; every segment but the last must be a folder.
    fn find_by_path(&self, root_id: &str, segments: &[String]) -> StoreResult<Option<StoreEntry>> {
        let mut parent_id = root_id.to_string();
        let mut current = None;
        for (index, segment) in segments.iter().enumerate() {
            let kind = if index + 1 == segments.len() {
                None
            } else {
                Some(EntryKind::Folder)
            };
            match self.find_child(&parent_id, segment, kind)? {
                Some(entry) => {
                    parent_id = entry.id.clone();
                    current = Some(entry);
                }
                None => return Ok(None),
            }
        }
        Ok(current)
    }
}
