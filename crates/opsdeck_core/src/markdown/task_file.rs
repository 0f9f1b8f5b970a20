//! Flat task-list documents.

use crate::markdown::checkbox::parse_checkbox;
use crate::model::snapshot::split_lines;
use crate::model::task::Task;

/// Parses every checkbox line of a flat task-list document.
///
/// Non-checkbox lines are ignored; there is no sectioning.
pub fn parse_task_file(text: &str) -> Vec<Task> {
    split_lines(text)
        .enumerate()
        .filter_map(|(index, line)| parse_checkbox(line, index))
        .collect()
}
