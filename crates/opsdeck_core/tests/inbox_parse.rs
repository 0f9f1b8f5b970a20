use opsdeck_core::parse_inbox;

#[test]
fn parses_dated_and_undated_items() {
    let items = parse_inbox("- [2024-01-02] Buy milk\n- No date here");
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].text, "Buy milk");
    assert_eq!(items[0].date, "2024-01-02");
    assert_eq!(items[1].text, "No date here");
    assert_eq!(items[1].date, "");
    assert!(!items[1].has_date());

    assert_ne!(items[0].id, items[1].id);
}

#[test]
fn skips_headers_and_blank_lines_and_keeps_duplicates() {
    let items = parse_inbox("# Inbox\n\n- same\n- same\nloose text\n");
    let texts = items.iter().map(|item| item.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["same", "same"]);
}

#[test]
fn identifiers_are_regenerated_per_parse() {
    let text = "- [2024-01-02] Buy milk";
    let first = parse_inbox(text);
    let second = parse_inbox(text);

    assert_eq!(first[0].text, second[0].text);
    assert_eq!(first[0].date, second[0].date);
    assert_ne!(first[0].id, second[0].id);
}

#[test]
fn malformed_date_stays_in_text() {
    let items = parse_inbox("- [2024-1-2] loose");
    assert_eq!(items[0].text, "[2024-1-2] loose");
    assert_eq!(items[0].date, "");
}
