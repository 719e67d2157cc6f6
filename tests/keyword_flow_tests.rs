//! End-to-end keyword sequences, the way an automation host would drive them
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use excel_keywords::{DocumentSession, run_keyword};

fn run(session: &mut DocumentSession, keyword: &str, args: &[&str]) -> Value {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    run_keyword(session, keyword, &args)
        .unwrap_or_else(|e| panic!("keyword `{}` failed: {:#}", keyword, e))
}

#[test]
fn test_create_write_save_close_flow() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("file.xlsx");
    let path = path.to_str().expect("utf-8 path");

    let mut session = DocumentSession::new();
    run(&mut session, "Create Excel Document", &["docname1"]);
    run(&mut session, "Write Excel Cell", &["1", "1", "text"]);
    run(&mut session, "Save Excel Document", &[path]);
    let closed = run(&mut session, "Close Current Excel Document", &[]);
    assert_eq!(closed, json!("docname1"));

    let opened = run(&mut session, "Open Excel Document", &[path, "doc2"]);
    assert_eq!(opened, json!("doc2"));
    let a1 = run(&mut session, "Read Excel Cell", &["1", "1"]);
    assert_eq!(a1, json!("text"));
}

#[test]
fn test_open_from_stream_keyword_takes_base64() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("stream.xlsx");

    let mut session = DocumentSession::new();
    run(&mut session, "create_excel_document", &["source"]);
    run(&mut session, "write_excel_cell", &["2", "2", "payload"]);
    run(
        &mut session,
        "save_excel_document",
        &[path.to_str().expect("utf-8 path")],
    );
    run(&mut session, "close_all_excel_documents", &[]);

    let bytes = std::fs::read(&path).expect("read saved file");
    let encoded = BASE64.encode(&bytes);
    run(
        &mut session,
        "open_excel_document_from_stream",
        &[&encoded, "streamed"],
    );
    assert_eq!(
        run(&mut session, "read_excel_cell", &["2", "2"]),
        json!("payload")
    );
}

#[test]
fn test_switch_between_documents() {
    let mut session = DocumentSession::new();
    run(&mut session, "create_excel_document", &["docname1"]);
    run(&mut session, "create_excel_document", &["docname2"]);

    run(&mut session, "write_excel_cell", &["1", "1", "second"]);
    let previous = run(&mut session, "switch_current_excel_document", &["docname1"]);
    assert_eq!(previous, json!("docname2"));
    run(&mut session, "write_excel_cell", &["1", "1", "first"]);

    assert_eq!(run(&mut session, "read_excel_cell", &["1", "1"]), json!("first"));
    run(&mut session, "switch_current_excel_document", &["docname2"]);
    assert_eq!(run(&mut session, "read_excel_cell", &["1", "1"]), json!("second"));
}

#[test]
fn test_column_roundtrip_through_keywords() {
    let mut session = DocumentSession::new();
    run(&mut session, "create_excel_document", &["docname1"]);
    run(
        &mut session,
        "write_excel_column",
        &["3", r#"["a1", "a2", "a3"]"#],
    );
    let column = run(&mut session, "read_excel_column", &["3", "0", "3"]);
    assert_eq!(column, json!(["a1", "a2", "a3"]));
}

#[test]
fn test_read_excel_sheet_returns_written_grid() {
    let mut session = DocumentSession::new();
    run(&mut session, "create_excel_document", &["docname1"]);
    run(
        &mut session,
        "write_excel_rows",
        &[r#"[["h1", "h2"], [1, 2]]"#],
    );
    let grid = run(&mut session, "read_excel_sheet", &[]);
    assert_eq!(grid, json!([["h1", "h2"], [1.0, 2.0]]));
}

#[test]
fn test_keyword_failure_without_open_document() {
    let mut session = DocumentSession::new();
    let args = vec!["1".to_string(), "1".to_string()];
    let err = run_keyword(&mut session, "read_excel_cell", &args).unwrap_err();
    assert!(err.to_string().contains("no open documents"));
}
