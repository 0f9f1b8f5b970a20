use chrono::NaiveDate;
use opsdeck_core::{
    DeckConfig, DeckService, DeckServiceError, DocumentStore, LineRef, LocalFolderStore,
    MutationError,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROADMAP: &str = "# Roadmap
**Last Updated**: 2024-05-01
**Status**: Green

## Current Sprint Focus
- Finish deck

## Quin Projects (Active)
### Alpha
- [x] Wire store
- [ ] Render cards
### Beta
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn service(dir: &TempDir) -> DeckService<LocalFolderStore> {
    DeckService::new(LocalFolderStore::new(dir.path()), DeckConfig::default())
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
}

#[test]
fn summary_of_empty_folder_creates_inbox_and_degrades_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let summary = service(&dir).summary().unwrap();

    assert!(summary.projects.is_empty());
    assert!(summary.tasks.is_empty());
    assert!(summary.inbox.is_empty());
    assert_eq!(summary.next_up, None);
    assert_eq!(summary.signal_feed, vec!["INGREDIENTS: 0", "ACTIVE MODULES: 0"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("INBOX.md")).unwrap(),
        "# Inbox\n\n"
    );
}

#[test]
fn summary_merges_roadmap_task_file_ingredients_and_inbox() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "PROJECT_ROADMAP.md", ROADMAP);
    write(dir.path(), "tools/second_brain/task.md", "- [ ] Triage\n- [x] Old");
    write(dir.path(), "ingredients/01_market_notes.md", "x");
    write(dir.path(), "ingredients/image.png", "x");
    write(dir.path(), "INBOX.md", "# Inbox\n\n- [2024-05-01] idea\n");

    let summary = service(&dir).summary().unwrap();

    assert_eq!(summary.projects.len(), 2);
    assert_eq!(summary.projects[0].progress, 50);
    assert_eq!(summary.current_sprint, vec!["Finish deck"]);

    let ids = summary
        .tasks
        .iter()
        .map(|task| task.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "PROJECT_ROADMAP.md:9",
            "PROJECT_ROADMAP.md:10",
            "tools/second_brain/task.md:0",
            "tools/second_brain/task.md:1",
        ]
    );
    assert_eq!(summary.tasks[0].source, "Alpha");
    assert_eq!(summary.tasks[2].source, "Second Brain");

    let next_up = summary.next_up.expect("an open task exists");
    assert_eq!(next_up.title, "Render cards");
    assert_eq!(next_up.source, "Alpha");
    assert_eq!(next_up.line_number, Some(10));

    assert_eq!(summary.ingredients.len(), 1);
    assert_eq!(summary.ingredients[0].title, "market notes");
    assert_eq!(summary.ingredients[0].id, "ingredients/01_market_notes.md");

    assert_eq!(summary.inbox.len(), 1);
    assert_eq!(
        summary.signal_feed,
        vec![
            "STATUS: Green",
            "ROADMAP UPDATED: 2024-05-01",
            "INGREDIENTS: 1",
            "ACTIVE MODULES: 2",
        ]
    );
}

#[test]
fn next_up_falls_back_to_sprint_then_inbox() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "INBOX.md", "- first\n- latest\n");
    let next_up = service(&dir).summary().unwrap().next_up.unwrap();
    assert_eq!(next_up.title, "latest");
    assert_eq!(next_up.source, "Inbox");
    assert_eq!(next_up.file_id, None);

    write(
        dir.path(),
        "PROJECT_ROADMAP.md",
        "## Current Sprint Focus\n- Focus item\n",
    );
    let next_up = service(&dir).summary().unwrap().next_up.unwrap();
    assert_eq!(next_up.title, "Focus item");
    assert_eq!(next_up.source, "Current Sprint");
}

#[test]
fn summary_serializes_wire_field_names() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "PROJECT_ROADMAP.md", ROADMAP);
    let json = serde_json::to_value(service(&dir).summary().unwrap()).unwrap();

    assert!(json.get("currentSprint").is_some());
    assert!(json.get("signalFeed").is_some());
    assert_eq!(json["nextUp"]["fileId"], "PROJECT_ROADMAP.md");
    assert_eq!(json["tasks"][0]["fileId"], "PROJECT_ROADMAP.md");
    assert_eq!(json["tasks"][0]["lineNumber"], 9);
    assert_eq!(json["projects"][1]["status"], "COMPLETE");
}

#[test]
fn toggle_task_writes_single_line_change() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "PROJECT_ROADMAP.md", ROADMAP);
    let service = service(&dir);

    let task = service.summary().unwrap().tasks.remove(1);
    let outcome = service
        .toggle_task(&task.file_id, &task.line_ref())
        .unwrap();
    assert!(outcome.done);

    let written = fs::read_to_string(dir.path().join("PROJECT_ROADMAP.md")).unwrap();
    assert_eq!(written, ROADMAP.replace("- [ ] Render cards", "- [x] Render cards"));
    assert!(service.summary().unwrap().tasks[1].done);
}

#[test]
fn stale_toggle_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "PROJECT_ROADMAP.md", ROADMAP);
    let service = service(&dir);
    let task = service.summary().unwrap().tasks.remove(0);

    let edited = format!("NEW FIRST LINE\n{ROADMAP}");
    write(dir.path(), "PROJECT_ROADMAP.md", &edited);

    let err = service
        .toggle_task(&task.file_id, &task.line_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        DeckServiceError::Mutation(MutationError::StaleReference { .. })
    ));
    assert!(err.is_client_error());
    assert_eq!(
        fs::read_to_string(dir.path().join("PROJECT_ROADMAP.md")).unwrap(),
        edited
    );
}

#[test]
fn toggle_rejects_non_checkbox_and_out_of_range_lines() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "PROJECT_ROADMAP.md", ROADMAP);
    let service = service(&dir);

    let err = service
        .toggle_task("PROJECT_ROADMAP.md", &LineRef::unpinned(0))
        .unwrap_err();
    assert!(matches!(
        err,
        DeckServiceError::Mutation(MutationError::NotACheckbox { line_number: 0 })
    ));

    let err = service
        .toggle_task("PROJECT_ROADMAP.md", &LineRef::unpinned(500))
        .unwrap_err();
    assert!(matches!(
        err,
        DeckServiceError::Mutation(MutationError::LineOutOfRange { .. })
    ));

    let err = service
        .toggle_task("missing.md", &LineRef::unpinned(0))
        .unwrap_err();
    assert!(matches!(err, DeckServiceError::Store(_)));
    assert!(!err.is_client_error());
}

#[test]
fn add_inbox_appends_dated_line() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);

    service.add_inbox("  first idea ", day()).unwrap();
    service.add_inbox("second", day()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("INBOX.md")).unwrap(),
        "# Inbox\n\n- [2024-05-02] first idea\n- [2024-05-02] second\n"
    );
    let items = service.inbox().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].date, "2024-05-02");
}

#[test]
fn add_inbox_rejects_blank_text() {
    let dir = tempfile::tempdir().unwrap();
    let err = service(&dir).add_inbox("   ", day()).unwrap_err();
    assert!(matches!(err, DeckServiceError::EmptyInboxText));
}

#[test]
fn store_find_by_path_requires_folders_for_inner_segments() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tools", "not a folder");
    let store = LocalFolderStore::new(dir.path());
    let segments = vec!["tools".to_string(), "task.md".to_string()];
    assert_eq!(store.find_by_path("", &segments).unwrap(), None);
}

#[test]
fn nested_config_paths_resolve_through_folders() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/ROADMAP.md", ROADMAP);
    write(dir.path(), "refs/ingredients/02_brief.md", "x");
    fs::create_dir_all(dir.path().join("capture")).unwrap();

    let config = DeckConfig::from_toml_str(
        r#"
roadmap_file = "docs/ROADMAP.md"
inbox_file = "capture/INBOX.md"
ingredients_folder = "refs/ingredients"
"#,
    )
    .unwrap();
    let service = DeckService::new(LocalFolderStore::new(dir.path()), config);

    let summary = service.summary().unwrap();
    assert_eq!(summary.projects.len(), 2);
    assert_eq!(summary.tasks[0].file_id, "docs/ROADMAP.md");
    assert_eq!(summary.ingredients[0].title, "brief");
    assert_eq!(
        fs::read_to_string(dir.path().join("capture/INBOX.md")).unwrap(),
        "# Inbox\n\n"
    );

    service.add_inbox("nested", day()).unwrap();
    assert_eq!(service.inbox().unwrap()[0].text, "nested");
}

#[test]
fn missing_nested_roadmap_folder_degrades_to_empty_roadmap() {
    let dir = tempfile::tempdir().unwrap();
    let config = DeckConfig::from_toml_str(r#"roadmap_file = "docs/ROADMAP.md""#).unwrap();
    let summary = DeckService::new(LocalFolderStore::new(dir.path()), config)
        .summary()
        .unwrap();
    assert!(summary.projects.is_empty());
}

#[test]
fn inbox_in_missing_folder_is_a_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DeckConfig::from_toml_str(r#"inbox_file = "capture/INBOX.md""#).unwrap();
    let err = DeckService::new(LocalFolderStore::new(dir.path()), config)
        .inbox()
        .unwrap_err();
    assert!(matches!(err, DeckServiceError::Store(_)));
}
