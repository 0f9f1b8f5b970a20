//! Dashboard assembly service.
//!
//! # Responsibility
//! - Read roadmap, task-list, ingredients and inbox documents from a store.
//! - Assemble the dashboard summary and apply inbox/checkbox mutations.
//!
//! # Invariants
//! - Every call re-reads and re-parses; nothing is cached between calls.
//! - Mutations are read-modify-write with no locking (last write wins).
//! - Document text never reaches the log; only ids, counts and lines do.

use crate::config::DeckConfig;
use crate::markdown::inbox::{append_inbox_entry, empty_inbox_document, parse_inbox};
use crate::markdown::mutate::{toggle_task_line, MutationError, ToggleOutcome};
use crate::markdown::roadmap::parse_roadmap_with;
use crate::markdown::task_file::parse_task_file;
use crate::model::inbox::InboxItem;
use crate::model::roadmap::{ProjectCard, RoadmapSummary};
use crate::model::snapshot::{LineRef, Revision};
use crate::service::project_service::build_projects;
use crate::store::{DocumentStore, EntryKind, StoreEntry, StoreError};
use chrono::NaiveDate;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static INGREDIENT_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+_?").expect("valid ingredient prefix regex"));
static MARKDOWN_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.md$").expect("valid markdown suffix regex"));

const SPRINT_SOURCE: &str = "Current Sprint";
const INBOX_SOURCE: &str = "Inbox";
const ROOT_ID: &str = "";

/// Service error for dashboard use-cases.
#[derive(Debug)]
pub enum DeckServiceError {
    Store(StoreError),
    /// The toggle target was declined.
    Mutation(MutationError),
    /// Inbox capture text is blank.
    EmptyInboxText,
}

impl Display for DeckServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "{err}"),
            Self::EmptyInboxText => write!(f, "inbox text cannot be empty"),
        }
    }
}

impl Error for DeckServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Mutation(err) => Some(err),
            Self::EmptyInboxText => None,
        }
    }
}

impl From<StoreError> for DeckServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<MutationError> for DeckServiceError {
    fn from(value: MutationError) -> Self {
        Self::Mutation(value)
    }
}

impl DeckServiceError {
    /// Whether the failure was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Mutation(_) | Self::EmptyInboxText)
    }
}

/// One addressable task on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckTask {
    /// `<file_id>:<line_number>`; only meaningful for `revision`.
    pub id: String,
    pub text: String,
    pub done: bool,
    pub file_id: String,
    pub line_number: usize,
    /// Revision of the document the line number was taken from.
    pub revision: Revision,
    /// Project name, or the task-list source label.
    pub source: String,
}

impl DeckTask {
    /// Reference that only applies to the document version this task came from.
    pub fn line_ref(&self) -> LineRef {
        LineRef::pinned(self.line_number, self.revision.clone())
    }
}

/// Suggested next item to work on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextUp {
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Markdown reference file listed from the ingredients folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub title: String,
}

/// Full dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub roadmap: RoadmapSummary,
    pub projects: Vec<ProjectCard>,
    pub current_sprint: Vec<String>,
    pub tasks: Vec<DeckTask>,
    pub next_up: Option<NextUp>,
    pub ingredients: Vec<Ingredient>,
    pub inbox: Vec<InboxItem>,
    pub signal_feed: Vec<String>,
}

/// Dashboard facade over a document store.
pub struct DeckService<S: DocumentStore> {
    store: S,
    config: DeckConfig,
}

impl<S: DocumentStore> DeckService<S> {
    pub fn new(store: S, config: DeckConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Assembles the full dashboard.
    ///
    /// The roadmap, task-list and ingredients folder are optional; the inbox
    /// is created when missing.
    pub fn summary(&self) -> Result<DeckSummary, DeckServiceError> {
        let mut tasks = Vec::new();

        let roadmap_file = self.find_entry(&self.config.roadmap_path(), EntryKind::File)?;
        let roadmap = match &roadmap_file {
            Some(file) => {
                let text = self.store.read_text(&file.id)?;
                let roadmap = parse_roadmap_with(&text, &self.config.roadmap);
                let revision = Revision::of(&text);
                for (project, task) in roadmap.tasks() {
                    tasks.push(deck_task(
                        &file.id,
                        &revision,
                        &project.name,
                        &task.text,
                        task.done,
                        task.line_number,
                    ));
                }
                roadmap
            }
            None => RoadmapSummary::default(),
        };
        let projects = build_projects(&roadmap.active_projects, &self.config.client_label);

        let task_file = self.find_entry(&self.config.task_file_segments(), EntryKind::File)?;
        if let Some(file) = &task_file {
            let text = self.store.read_text(&file.id)?;
            let revision = Revision::of(&text);
            for task in parse_task_file(&text) {
                tasks.push(deck_task(
                    &file.id,
                    &revision,
                    &self.config.task_file_source,
                    &task.text,
                    task.done,
                    task.line_number,
                ));
            }
        }

        let ingredients = self.ingredients()?;
        let inbox = self.inbox()?;
        let next_up = pick_next_up(&tasks, &roadmap.current_sprint, &inbox);
        let signal_feed = signal_feed(&roadmap, ingredients.len(), projects.len());

        info!(
            "event=deck_summary module=service status=ok roadmap={} task_file={} projects={} tasks={} ingredients={} inbox={}",
            roadmap_file.is_some(),
            task_file.is_some(),
            projects.len(),
            tasks.len(),
            ingredients.len(),
            inbox.len()
        );

        Ok(DeckSummary {
            current_sprint: roadmap.current_sprint.clone(),
            roadmap,
            projects,
            tasks,
            next_up,
            ingredients,
            inbox,
            signal_feed,
        })
    }

    /// Parses the inbox, creating it first when missing.
    pub fn inbox(&self) -> Result<Vec<InboxItem>, DeckServiceError> {
        let file = self.ensure_inbox_file()?;
        let text = self.store.read_text(&file.id)?;
        Ok(parse_inbox(&text))
    }

    /// Appends one dated note to the inbox.
    pub fn add_inbox(&self, text: &str, date: NaiveDate) -> Result<(), DeckServiceError> {
        if text.trim().is_empty() {
            return Err(DeckServiceError::EmptyInboxText);
        }
        let file = self.ensure_inbox_file()?;
        let existing = self.store.read_text(&file.id)?;
        let content = append_inbox_entry(&existing, text, date, &self.config.inbox_header)
            .ok_or(DeckServiceError::EmptyInboxText)?;
        self.store.write_text(&file.id, &content)?;
        info!(
            "event=inbox_append module=service status=ok file_id={} date={}",
            file.id, date
        );
        Ok(())
    }

    /// Toggles one checkbox line of `file_id` and writes the document back.
    ///
    /// # Errors
    /// - `Mutation` when the reference is stale, out of range or not a
    ///   checkbox. Nothing is written in that case.
    /// - `Store` on read/write failures.
    pub fn toggle_task(
        &self,
        file_id: &str,
        line_ref: &LineRef,
    ) -> Result<ToggleOutcome, DeckServiceError> {
        let text = self.store.read_text(file_id)?;
        let outcome = match toggle_task_line(&text, line_ref) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "event=task_toggle module=service status=rejected file_id={} line={} reason={}",
                    file_id, line_ref.line_number, err
                );
                return Err(err.into());
            }
        };
        self.store.write_text(file_id, &outcome.content)?;
        info!(
            "event=task_toggle module=service status=ok file_id={} line={} done={}",
            file_id, outcome.line_number, outcome.done
        );
        Ok(outcome)
    }

    /// Lists `.md` files of the ingredients folder, or nothing when absent.
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, DeckServiceError> {
        let Some(folder) = self.find_entry(&self.config.ingredients_path(), EntryKind::Folder)?
        else {
            return Ok(Vec::new());
        };
        Ok(self
            .store
            .list_children(&folder.id)?
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::File)
            .filter(|entry| entry.name.to_lowercase().ends_with(".md"))
            .map(|entry| Ingredient {
                title: ingredient_title(&entry.name),
                id: entry.id,
                name: entry.name,
            })
            .collect())
    }

    /// Resolves `/`-split config path segments from the store root.
    fn find_entry(
        &self,
        segments: &[String],
        kind: EntryKind,
    ) -> Result<Option<StoreEntry>, DeckServiceError> {
        Ok(self
            .store
            .find_by_path(ROOT_ID, segments)?
            .filter(|entry| entry.kind == kind))
    }

    fn ensure_inbox_file(&self) -> Result<StoreEntry, DeckServiceError> {
        let segments = self.config.inbox_path();
        if let Some(existing) = self.find_entry(&segments, EntryKind::File)? {
            return Ok(existing);
        }
        let Some((name, parent)) = segments.split_last() else {
            return Err(StoreError::InvalidId(self.config.inbox_file.clone()).into());
        };
        let parent_id = if parent.is_empty() {
            ROOT_ID.to_string()
        } else {
            self.find_entry(parent, EntryKind::Folder)?
                .map(|folder| folder.id)
                .ok_or_else(|| StoreError::NotFound(parent.join("/")))?
        };
        let created = self.store.create_file(
            &parent_id,
            name,
            &empty_inbox_document(&self.config.inbox_header),
        )?;
        info!(
            "event=inbox_create module=service status=ok file_id={}",
            created.id
        );
        Ok(created)
    }
}

fn deck_task(
    file_id: &str,
    revision: &Revision,
    source: &str,
    text: &str,
    done: bool,
    line_number: usize,
) -> DeckTask {
    DeckTask {
        id: format!("{file_id}:{line_number}"),
        text: text.to_string(),
        done,
        file_id: file_id.to_string(),
        line_number,
        revision: revision.clone(),
        source: source.to_string(),
    }
}

/// Display title for an ingredient file name.
///
/// Strips a leading number (and one `_`), the `.md` suffix, and turns `_`
/// into spaces.
pub fn ingredient_title(name: &str) -> String {
    let without_prefix = INGREDIENT_PREFIX_RE.replace(name, "");
    let without_suffix = MARKDOWN_SUFFIX_RE.replace(&without_prefix, "");
    without_suffix.replace('_', " ").trim().to_string()
}

/// First open task, then the first sprint item, then the latest inbox note.
pub fn pick_next_up(
    tasks: &[DeckTask],
    current_sprint: &[String],
    inbox: &[InboxItem],
) -> Option<NextUp> {
    if let Some(task) = tasks.iter().find(|task| !task.done) {
        return Some(NextUp {
            title: task.text.clone(),
            source: task.source.clone(),
            file_id: Some(task.file_id.clone()),
            line_number: Some(task.line_number),
            done: Some(task.done),
        });
    }
    if let Some(first) = current_sprint.first() {
        return Some(NextUp {
            title: first.clone(),
            source: SPRINT_SOURCE.to_string(),
            file_id: None,
            line_number: None,
            done: None,
        });
    }
    inbox.last().map(|latest| NextUp {
        title: latest.text.clone(),
        source: INBOX_SOURCE.to_string(),
        file_id: None,
        line_number: None,
        done: None,
    })
}

/// Short status lines shown in the dashboard ticker.
pub fn signal_feed(
    roadmap: &RoadmapSummary,
    ingredient_count: usize,
    project_count: usize,
) -> Vec<String> {
    let mut feed = Vec::new();
    if !roadmap.status.is_empty() {
        feed.push(format!("STATUS: {}", roadmap.status));
    }
    if !roadmap.last_updated.is_empty() {
        feed.push(format!("ROADMAP UPDATED: {}", roadmap.last_updated));
    }
    feed.push(format!("INGREDIENTS: {ingredient_count}"));
    feed.push(format!("ACTIVE MODULES: {project_count}"));
    feed
}

#[cfg(test)]
mod tests {
    use super::ingredient_title;

    #[test]
    fn ingredient_title_strips_numbering_and_extension() {
        assert_eq!(ingredient_title("01_market_notes.md"), "market notes");
        assert_eq!(ingredient_title("7brief.MD"), "brief");
        assert_eq!(ingredient_title("plain.md"), "plain");
    }
}
