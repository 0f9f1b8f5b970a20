use opsdeck_core::{build_projects, parse_roadmap, project_slug, Project, ProjectStatus, Task};

#[test]
fn builds_progress_and_status_from_roadmap_projects() {
    let roadmap = parse_roadmap(
        "## Quin Projects (Active)\n### Alpha\n- [x] Done thing\n- [ ] Open thing\n### Beta\n",
    );
    let cards = build_projects(&roadmap.active_projects, "BBL.PKG");
    assert_eq!(cards.len(), 2);

    let alpha = &cards[0];
    assert_eq!(alpha.id, "alpha");
    assert_eq!(alpha.name, "ALPHA");
    assert_eq!(alpha.progress, 50);
    assert_eq!(alpha.status, ProjectStatus::InProgress);
    assert_eq!(alpha.crew, 2);
    assert_eq!(alpha.urgent, 1);
    assert_eq!(alpha.focus, "OPEN THING");
    assert_eq!(alpha.client, "BBL.PKG");

    let beta = &cards[1];
    assert_eq!(beta.progress, 0);
    assert_eq!(beta.status, ProjectStatus::Complete);
    assert_eq!(beta.focus, "MAINTAIN");
}

#[test]
fn focus_is_truncated_to_36_characters() {
    let mut project = Project::new("Long Focus");
    project
        .tasks
        .push(Task::new("abcdefghijklmnopqrstuvwxyz0123456789-overflow", false, 0));
    let card = &build_projects(&[project], "X")[0];
    assert_eq!(card.focus, "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789");
    assert_eq!(card.name, "LONG_FOCUS");
}

#[test]
fn fully_done_project_is_complete() {
    let mut project = Project::new("Gamma");
    project.tasks.push(Task::new("a", true, 0));
    project.tasks.push(Task::new("b", true, 1));
    let card = &build_projects(&[project], "X")[0];
    assert_eq!(card.status, ProjectStatus::Complete);
    assert_eq!(card.progress, 100);
    assert_eq!(card.focus, "MAINTAIN");
}

#[test]
fn slug_collisions_are_not_resolved() {
    assert_eq!(project_slug("Ops Deck"), project_slug("ops-deck"));
    assert_eq!(project_slug("Ops Deck"), "ops-deck");
}

#[test]
fn card_serializes_status_in_screaming_case() {
    let card = build_projects(&[Project::new("Empty")], "X").remove(0);
    let json = serde_json::to_value(card).unwrap();
    assert_eq!(json["status"], "COMPLETE");
    assert_eq!(json["progress"], 0);
}
