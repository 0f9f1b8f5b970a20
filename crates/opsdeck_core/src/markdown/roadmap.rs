//! Roadmap document parser.
//!
//! # Responsibility
//! - Extract metadata, sprint focus and active projects from the roadmap.
//! - Keep section transitions in a small explicit state machine.
//!
//! # Invariants
//! - `**Last Updated**:` / `**Status**:` are read from any line, regardless
//!   of section. The last occurrence wins.
//! - Only `## ` headings move the section cursor; `### ` headings open a
//!   project only inside the projects section.
//! - A project is committed when the next `### ` heading or the end of the
//!   document is reached. Leaving the projects section through any other
//!   `## ` heading discards the open project.
//! - Project order follows heading order; task order follows line order.

use crate::markdown::checkbox::parse_checkbox;
use crate::model::roadmap::{Project, RoadmapSummary};
use crate::model::snapshot::{split_lines, BYTE_ORDER_MARK};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LAST_UPDATED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*Last Updated\*\*:\s*(.+)").expect("valid last-updated regex")
});
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Status\*\*:\s*(.+)").expect("valid status regex"));
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s*").expect("valid list marker regex"));

const LAST_UPDATED_KEY: &str = "**Last Updated**";
const STATUS_KEY: &str = "**Status**";

pub const DEFAULT_SPRINT_HEADING: &str = "Current Sprint Focus";
pub const DEFAULT_PROJECTS_HEADING: &str = "Quin Projects (Active)";

/// Exact `## ` heading texts that select the recognized sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapLayout {
    #[serde(default = "default_sprint_heading")]
    pub sprint_heading: String,
    #[serde(default = "default_projects_heading")]
    pub projects_heading: String,
}

impl Default for RoadmapLayout {
    fn default() -> Self {
        Self {
            sprint_heading: default_sprint_heading(),
            projects_heading: default_projects_heading(),
        }
    }
}

fn default_sprint_heading() -> String {
    DEFAULT_SPRINT_HEADING.to_string()
}

fn default_projects_heading() -> String {
    DEFAULT_PROJECTS_HEADING.to_string()
}

impl RoadmapLayout {
    /// Maps a `## ` heading text to the section it opens.
    pub fn section_for(&self, heading: &str) -> RoadmapSection {
        if heading == self.sprint_heading {
            RoadmapSection::Sprint
        } else if heading == self.projects_heading {
            RoadmapSection::Projects
        } else {
            RoadmapSection::None
        }
    }
}

/// Section cursor of the roadmap parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapSection {
    /// Before the first heading or inside an unrecognized section.
    None,
    Sprint,
    Projects,
}

/// Line-at-a-time roadmap parser.
///
/// Holds the current section and a single open-project accumulator.
#[derive(Debug)]
pub struct RoadmapParser<'a> {
    layout: &'a RoadmapLayout,
    section: RoadmapSection,
    open_project: Option<Project>,
    summary: RoadmapSummary,
}

impl<'a> RoadmapParser<'a> {
    pub fn new(layout: &'a RoadmapLayout) -> Self {
        Self {
            layout,
            section: RoadmapSection::None,
            open_project: None,
            summary: RoadmapSummary::default(),
        }
    }

    pub fn section(&self) -> RoadmapSection {
        self.section
    }

    /// Name of the project currently accumulating tasks.
    pub fn open_project(&self) -> Option<&str> {
        self.open_project.as_ref().map(|project| project.name.as_str())
    }

    /// Consumes one raw line at 0-based `line_number`.
    pub fn feed(&mut self, line_number: usize, line: &str) {
        let trimmed = line.trim_start_matches(BYTE_ORDER_MARK).trim();
        self.scan_metadata(trimmed);

        if let Some(heading) = trimmed.strip_prefix("## ") {
            self.enter_section(self.layout.section_for(heading.trim_start()));
            return;
        }

        match self.section {
            RoadmapSection::Sprint => self.feed_sprint(trimmed),
            RoadmapSection::Projects => self.feed_projects(line_number, trimmed),
            RoadmapSection::None => {}
        }
    }

    /// Commits the open project and returns the summary.
    pub fn finish(mut self) -> RoadmapSummary {
        if let Some(project) = self.open_project.take() {
            self.summary.active_projects.push(project);
        }
        self.summary
    }

    fn enter_section(&mut self, section: RoadmapSection) {
        if section != RoadmapSection::Projects {
            self.open_project = None;
        }
        self.section = section;
    }

    fn scan_metadata(&mut self, trimmed: &str) {
        if trimmed.starts_with(LAST_UPDATED_KEY) {
            if let Some(value) = capture_value(&LAST_UPDATED_RE, trimmed) {
                self.summary.last_updated = value;
            }
        }
        if trimmed.starts_with(STATUS_KEY) {
            if let Some(value) = capture_value(&STATUS_RE, trimmed) {
                self.summary.status = value;
            }
        }
    }

    fn feed_sprint(&mut self, trimmed: &str) {
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        let without_marker = LIST_MARKER_RE.replace(trimmed, "");
        let cleaned = without_marker.replace("**", "");
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            self.summary.current_sprint.push(cleaned.to_string());
        }
    }

    fn feed_projects(&mut self, line_number: usize, trimmed: &str) {
        if let Some(name) = trimmed.strip_prefix("### ") {
            if let Some(done) = self.open_project.take() {
                self.summary.active_projects.push(done);
            }
            self.open_project = Some(Project::new(name.trim()));
            return;
        }
        if let Some(project) = self.open_project.as_mut() {
            if let Some(task) = parse_checkbox(trimmed, line_number) {
                project.tasks.push(task);
            }
        }
    }
}

fn capture_value(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parses a roadmap document with the default section headings.
pub fn parse_roadmap(text: &str) -> RoadmapSummary {
    parse_roadmap_with(text, &RoadmapLayout::default())
}

/// Parses a roadmap document with caller-provided section headings.
pub fn parse_roadmap_with(text: &str, layout: &RoadmapLayout) -> RoadmapSummary {
    let mut parser = RoadmapParser::new(layout);
    for (line_number, line) in split_lines(text).enumerate() {
        parser.feed(line_number, line);
    }
    parser.finish()
}
