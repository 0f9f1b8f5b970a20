//! Core logic for Ops Deck.
//! Markdown documents in a flat-file store are the only database; this crate
//! parses them into dashboard records and rewrites single checkbox lines.

pub mod config;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, DeckConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use markdown::checkbox::{parse_checkbox, toggle_checkbox_line};
pub use markdown::inbox::{append_inbox_entry, parse_inbox};
pub use markdown::mutate::{toggle_task_line, MutationError, ToggleOutcome};
pub use markdown::roadmap::{
    parse_roadmap, parse_roadmap_with, RoadmapLayout, RoadmapParser, RoadmapSection,
};
pub use markdown::task_file::parse_task_file;
pub use model::inbox::InboxItem;
pub use model::roadmap::{Project, ProjectCard, ProjectStatus, RoadmapSummary};
pub use model::snapshot::{DocumentSnapshot, LineRef, Revision};
pub use model::task::Task;
pub use service::deck_service::{
    DeckService, DeckServiceError, DeckSummary, DeckTask, Ingredient, NextUp,
};
pub use service::project_service::{build_projects, project_slug};
pub use store::{DocumentStore, EntryKind, LocalFolderStore, StoreEntry, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
