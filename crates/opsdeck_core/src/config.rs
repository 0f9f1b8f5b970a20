//! Dashboard configuration.
//!
//! # Responsibility
//! - Name the documents and folders the dashboard reads from the store.
//! - Load overrides from TOML; every missing key keeps its default.
//!
//! # Invariants
//! - Core never reads environment variables; callers pass a `DeckConfig`.

use crate::markdown::inbox::DEFAULT_INBOX_HEADER;
use crate::markdown::roadmap::RoadmapLayout;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Names and labels used to assemble the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Roadmap file name inside the store root.
    #[serde(default = "default_roadmap_file")]
    pub roadmap_file: String,

    /// Inbox file name inside the store root; created when missing.
    #[serde(default = "default_inbox_file")]
    pub inbox_file: String,

    /// First line of a freshly created inbox.
    #[serde(default = "default_inbox_header")]
    pub inbox_header: String,

    /// Path segments of the flat task-list file, relative to the root.
    #[serde(default = "default_task_file_path")]
    pub task_file_path: Vec<String>,

    /// Source label attached to task-list tasks.
    #[serde(default = "default_task_file_source")]
    pub task_file_source: String,

    /// Folder whose markdown files are listed as ingredients.
    #[serde(default = "default_ingredients_folder")]
    pub ingredients_folder: String,

    /// Client label printed on every project card.
    #[serde(default = "default_client_label")]
    pub client_label: String,

    /// Roadmap section headings.
    #[serde(default)]
    pub roadmap: RoadmapLayout,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            roadmap_file: default_roadmap_file(),
            inbox_file: default_inbox_file(),
            inbox_header: default_inbox_header(),
            task_file_path: default_task_file_path(),
            task_file_source: default_task_file_source(),
            ingredients_folder: default_ingredients_folder(),
            client_label: default_client_label(),
            roadmap: RoadmapLayout::default(),
        }
    }
}

fn default_roadmap_file() -> String {
    "PROJECT_ROADMAP.md".to_string()
}

fn default_inbox_file() -> String {
    "INBOX.md".to_string()
}

fn default_inbox_header() -> String {
    DEFAULT_INBOX_HEADER.to_string()
}

fn default_task_file_path() -> Vec<String> {
    ["tools", "second_brain", "task.md"]
        .iter()
        .map(|segment| segment.to_string())
        .collect()
}

fn default_task_file_source() -> String {
    "Second Brain".to_string()
}

fn default_ingredients_folder() -> String {
    "ingredients".to_string()
}

fn default_client_label() -> String {
    "BBL.PKG".to_string()
}

/// Splits a `/`-separated store path, dropping empty segments.
pub fn path_segments(value: &str) -> Vec<String> {
    value
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration load failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    /// A document or folder path cannot address a store entry.
    InvalidPath { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::InvalidPath { key, value } => {
                write!(f, "invalid config path for `{key}`: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidPath { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl DeckConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects document paths that are empty or contain `.`/`..` segments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("roadmap_file", self.roadmap_path()),
            ("inbox_file", self.inbox_path()),
            ("task_file_path", self.task_file_segments()),
            ("ingredients_folder", self.ingredients_path()),
        ];
        for (key, segments) in paths {
            let invalid = segments.is_empty()
                || segments
                    .iter()
                    .any(|segment| segment == "." || segment == ".." || segment.contains('\\'));
            if invalid {
                return Err(ConfigError::InvalidPath {
                    key,
                    value: segments.join("/"),
                });
            }
        }
        Ok(())
    }

    /// Store path segments of the roadmap document.
    pub fn roadmap_path(&self) -> Vec<String> {
        path_segments(&self.roadmap_file)
    }

    /// Store path segments of the inbox document.
    pub fn inbox_path(&self) -> Vec<String> {
        path_segments(&self.inbox_file)
    }

    pub fn ingredients_path(&self) -> Vec<String> {
        path_segments(&self.ingredients_folder)
    }

    /// `task_file_path` with any `/` inside a segment split out.
    pub fn task_file_segments(&self) -> Vec<String> {
        self.task_file_path
            .iter()
            .flat_map(|segment| path_segments(segment))
            .collect()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
