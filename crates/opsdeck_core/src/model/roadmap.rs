//! Roadmap document projections.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// One `###` project block under the active-projects section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Checkbox lines in source order.
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }

    /// First task that is not done, in line order.
    pub fn next_open_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| !task.done)
    }
}

/// Parsed roadmap document.
///
/// Missing sections and metadata degrade to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummary {
    pub last_updated: String,
    pub status: String,
    pub current_sprint: Vec<String>,
    pub active_projects: Vec<Project>,
}

impl RoadmapSummary {
    /// Iterates `(project, task)` pairs in document order.
    pub fn tasks(&self) -> impl Iterator<Item = (&Project, &Task)> {
        self.active_projects
            .iter()
            .flat_map(|project| project.tasks.iter().map(move |task| (project, task)))
    }
}

/// Completion state of a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Every task is done, including projects with no tasks at all.
    Complete,
    InProgress,
}

/// Display record derived from one [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    /// Slug of the project name. Distinct names may collide.
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    /// Rounded completion percentage, `0` for empty projects.
    pub progress: u32,
    /// Total task count.
    pub crew: usize,
    /// Open task count.
    pub urgent: usize,
    pub client: String,
    pub focus: String,
    pub tasks: Vec<Task>,
}
