use opsdeck_core::{
    parse_inbox, parse_roadmap, parse_task_file, toggle_checkbox_line, toggle_task_line, LineRef,
    Task,
};

#[test]
fn task_file_keeps_first_task_after_byte_order_mark() {
    let tasks = parse_task_file("\u{feff}- [ ] first\n- [x] second");
    assert_eq!(
        tasks,
        vec![Task::new("first", false, 0), Task::new("second", true, 1)]
    );
}

#[test]
fn roadmap_heading_on_first_line_survives_byte_order_mark() {
    let roadmap = parse_roadmap("\u{feff}## Quin Projects (Active)\n### A\n- [ ] t");
    assert_eq!(roadmap.active_projects.len(), 1);
    assert_eq!(roadmap.active_projects[0].name, "A");
    assert_eq!(roadmap.active_projects[0].tasks, vec![Task::new("t", false, 2)]);
}

#[test]
fn roadmap_metadata_on_first_line_survives_byte_order_mark() {
    assert_eq!(parse_roadmap("\u{feff}**Status**: Green").status, "Green");
}

#[test]
fn inbox_first_item_survives_byte_order_mark() {
    let items = parse_inbox("\u{feff}- [2024-01-02] first");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].date, "2024-01-02");
}

#[test]
fn toggling_first_line_writes_byte_order_mark_back() {
    assert_eq!(
        toggle_checkbox_line("\u{feff}- [ ] first").as_deref(),
        Some("\u{feff}- [x] first")
    );

    let outcome = toggle_task_line("\u{feff}- [ ] first\r\n- [x] second", &LineRef::unpinned(0))
        .expect("first line is a checkbox");
    assert_eq!(outcome.content, "\u{feff}- [x] first\n- [x] second");
    assert!(outcome.done);

    let again = toggle_task_line(&outcome.content, &LineRef::unpinned(0)).expect("toggle back");
    assert_eq!(again.content, "\u{feff}- [ ] first\n- [x] second");
}
