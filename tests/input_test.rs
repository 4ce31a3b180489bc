//! Tests for input normalization and file loading.

use std::fs;

use sentio::{InputLimits, SentioError, TextSource};

#[test]
fn text_is_trimmed_into_one_item() {
    let items = TextSource::Text("  I love this!  \n".to_string()).normalize();
    assert_eq!(items, vec!["I love this!".to_string()]);
}

#[test]
fn blank_text_is_a_no_op() {
    assert!(TextSource::Text("   \n\t ".to_string()).normalize().is_empty());
    assert!(TextSource::Text(String::new()).normalize().is_empty());
}

#[test]
fn text_keeps_inner_newlines() {
    let items = TextSource::Text("first line\nsecond line".to_string()).normalize();
    assert_eq!(items, vec!["first line\nsecond line".to_string()]);
}

#[test]
fn file_drops_empty_and_whitespace_lines() {
    let items = TextSource::File("a\n\n  \nb".to_string()).normalize();
    assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn file_handles_crlf_line_endings() {
    let items = TextSource::File("one\r\ntwo\r\n\r\n three \r\n".to_string()).normalize();
    assert_eq!(items, vec!["one", "two", "three"]);
}

#[test]
fn file_is_capped_at_twenty_lines_in_order() {
    let content = (1..=30)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let items = TextSource::File(content).normalize();

    assert_eq!(items.len(), 20);
    assert_eq!(items.first().map(String::as_str), Some("line 1"));
    assert_eq!(items.last().map(String::as_str), Some("line 20"));
}

#[test]
fn cap_counts_only_non_empty_lines() {
    let content = (1..=25)
        .map(|i| format!("line {i}\n\n"))
        .collect::<String>();
    let items = TextSource::File(content).normalize();
    assert_eq!(items.len(), 20);
    assert_eq!(items[19], "line 20");
}

#[test]
fn custom_limits_apply_to_files() {
    let limits = InputLimits {
        max_items: 2,
        max_chars: 500,
    };
    let items = TextSource::File("a\nb\nc".to_string()).normalize_with(&limits);
    assert_eq!(items, vec!["a", "b"]);
}

#[test]
fn json_and_csv_files_are_read_as_plain_lines() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("reviews.json");
    fs::write(&json_path, "[\n  \"great\",\n  \"awful\"\n]\n").unwrap();
    let items = TextSource::from_path(&json_path).unwrap().normalize();
    assert_eq!(items, vec!["[", "\"great\",", "\"awful\"", "]"]);

    let csv_path = dir.path().join("reviews.CSV");
    fs::write(&csv_path, "text,score\n\"fine\",3\n").unwrap();
    let items = TextSource::from_path(&csv_path).unwrap().normalize();
    assert_eq!(items, vec!["text,score", "\"fine\",3"]);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "hello").unwrap();

    match TextSource::from_path(&path) {
        Err(SentioError::InvalidInput(msg)) => assert!(msg.contains(".txt")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    assert!(matches!(
        TextSource::from_path(&path),
        Err(SentioError::Io(_))
    ));
}
