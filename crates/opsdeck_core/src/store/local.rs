//! Directory-backed document store.

use super::{DocumentStore, EntryKind, StoreEntry, StoreError, StoreResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Treats one local directory as a flat-file database.
///
/// Ids are `/`-joined paths relative to the root directory.
#[derive(Debug, Clone)]
pub struct LocalFolderStore {
    root: PathBuf,
}

impl LocalFolderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, id: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(id);
        if relative.is_absolute() {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(StoreError::InvalidId(id.to_string())),
            }
        }
        Ok(self.root.join(relative))
    }

    fn io_error(id: &str, source: std::io::Error) -> StoreError {
        if source.kind() == ErrorKind::NotFound {
            StoreError::NotFound(id.to_string())
        } else {
            StoreError::Io {
                id: id.to_string(),
                source,
            }
        }
    }
}

fn child_id(parent_id: &str, name: &str) -> String {
    if parent_id.is_empty() {
        name.to_string()
    } else {
        format!("{parent_id}/{name}")
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl DocumentStore for LocalFolderStore {
    fn find_child(
        &self,
        parent_id: &str,
        name: &str,
        kind: Option<EntryKind>,
    ) -> StoreResult<Option<StoreEntry>> {
        if !valid_name(name) {
            return Err(StoreError::InvalidId(name.to_string()));
        }
        let id = child_id(parent_id, name);
        let path = self.resolve(&id)?;
        let found = if path.is_dir() {
            Some(EntryKind::Folder)
        } else if path.is_file() {
            Some(EntryKind::File)
        } else {
            None
        };
        Ok(found
            .filter(|found| kind.map_or(true, |wanted| wanted == *found))
            .map(|found| StoreEntry {
                id,
                name: name.to_string(),
                kind: found,
            }))
    }

    fn list_children(&self, parent_id: &str) -> StoreResult<Vec<StoreEntry>> {
        let dir = self.resolve(parent_id)?;
        let reader = fs::read_dir(&dir).map_err(|err| Self::io_error(parent_id, err))?;
        let mut entries = Vec::new();
        for item in reader {
            let item = item.map_err(|err| Self::io_error(parent_id, err))?;
            let Ok(name) = item.file_name().into_string() else {
                continue;
            };
            let file_type = item
                .file_type()
                .map_err(|err| Self::io_error(parent_id, err))?;
            let kind = if file_type.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            entries.push(StoreEntry {
                id: child_id(parent_id, &name),
                name,
                kind,
            });
        }
        entries.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(entries)
    }

    fn read_text(&self, file_id: &str) -> StoreResult<String> {
        let path = self.resolve(file_id)?;
        fs::read_to_string(&path).map_err(|err| Self::io_error(file_id, err))
    }

    fn write_text(&self, file_id: &str, content: &str) -> StoreResult<()> {
        let path = self.resolve(file_id)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(file_id.to_string()));
        }
        fs::write(&path, content).map_err(|err| Self::io_error(file_id, err))?;
        debug!(
            "event=store_write module=store status=ok id={} bytes={}",
            file_id,
            content.len()
        );
        Ok(())
    }

    fn create_file(&self, parent_id: &str, name: &str, content: &str) -> StoreResult<StoreEntry> {
        if !valid_name(name) {
            return Err(StoreError::InvalidId(name.to_string()));
        }
        let parent = self.resolve(parent_id)?;
        fs::create_dir_all(&parent).map_err(|err| Self::io_error(parent_id, err))?;
        let id = child_id(parent_id, name);
        let path = self.resolve(&id)?;
        fs::write(&path, content).map_err(|err| Self::io_error(&id, err))?;
        debug!("event=store_create module=store status=ok id={}", id);
        Ok(StoreEntry {
            id,
            name: name.to_string(),
            kind: EntryKind::File,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{child_id, LocalFolderStore};
    use crate::store::{DocumentStore, StoreError};

    #[test]
    fn child_id_joins_with_slash() {
        assert_eq!(child_id("", "a.md"), "a.md");
        assert_eq!(child_id("tools", "a.md"), "tools/a.md");
    }

    #[test]
    fn ids_escaping_root_are_rejected() {
        let store = LocalFolderStore::new(std::env::temp_dir());
        let err = store
            .read_text("../etc/passwd")
            .expect_err("parent traversal must be rejected");
        assert!(matches!(err, StoreError::InvalidId(_)));

        let err = store
            .find_child("", "..", None)
            .expect_err("dot-dot name must be rejected");
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
