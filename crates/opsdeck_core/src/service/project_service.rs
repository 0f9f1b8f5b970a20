//! Project card derivation.
//!
//! # Invariants
//! - Pure: cards are recomputed from `Project` values on every call.
//! - Slugs are not de-duplicated; distinct names can share an id.

use crate::model::roadmap::{Project, ProjectCard, ProjectStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const FOCUS_MAX_CHARS: usize = 36;
const IDLE_FOCUS: &str = "MAINTAIN";

/// Lower-cases `name` and collapses each run of non-`[a-z0-9]` into `-`.
pub fn project_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    SLUG_SEPARATOR_RE.replace_all(&lowered, "-").into_owned()
}

/// Rounded `100 * done / total`, `0` when `total == 0`.
pub fn completion_percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Half rounds up, matching `round()` for non-negative ratios.
    ((200 * done + total) / (2 * total)) as u32
}

/// Builds one display card per project, in input order.
pub fn build_projects(projects: &[Project], client_label: &str) -> Vec<ProjectCard> {
    projects
        .iter()
        .map(|project| build_project_card(project, client_label))
        .collect()
}

pub fn build_project_card(project: &Project, client_label: &str) -> ProjectCard {
    let total = project.tasks.len();
    let done = project.done_count();
    let status = if done == total {
        ProjectStatus::Complete
    } else {
        ProjectStatus::InProgress
    };
    let focus = match project.next_open_task() {
        Some(task) => task
            .text
            .chars()
            .take(FOCUS_MAX_CHARS)
            .collect::<String>()
            .to_uppercase(),
        None => IDLE_FOCUS.to_string(),
    };

    ProjectCard {
        id: project_slug(&project.name),
        name: WHITESPACE_RE
            .replace_all(&project.name, "_")
            .to_uppercase(),
        status,
        progress: completion_percent(done, total),
        crew: total,
        urgent: total - done,
        client: client_label.to_string(),
        focus,
        tasks: project.tasks.clone(),
    }
}
