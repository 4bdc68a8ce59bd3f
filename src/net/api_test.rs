use super::*;
use crate::session::MemorySessionStore;

#[test]
fn note_path_formats_expected_path() {
    assert_eq!(note_path(&RecordId::from_number(12)), "/api/postits/12");
    assert_eq!(note_path(&RecordId::new("a-b")), "/api/postits/a-b");
}

#[test]
fn check_status_accepts_2xx() {
    assert!(check_status(200, "").is_ok());
    assert!(check_status(204, "").is_ok());
}

#[test]
fn check_status_extracts_structured_message() {
    let err = check_status(400, r#"{"error":"Content is required"}"#).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, message: Some(ref m) } if m == "Content is required"));
}

#[test]
fn check_status_without_body_has_no_message() {
    let err = check_status(502, "Bad Gateway").unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, message: None }));
    assert_eq!(err.user_message(), "Unknown error");
}

#[test]
fn parse_note_listing_bare_and_envelope_match() {
    let bare = r#"[{"id":1,"content":"a","boardId":1},{"id":2,"content":"b","boardId":2}]"#;
    let envelope = format!(r#"{{"postits":{bare}}}"#);
    let from_bare = parse_note_listing(bare).unwrap();
    let from_envelope = parse_note_listing(&envelope).unwrap();
    assert_eq!(from_bare.len(), 2);
    assert_eq!(from_bare, from_envelope);
}

#[test]
fn parse_note_listing_rejects_other_shapes() {
    assert!(matches!(parse_note_listing(r#"{"notes":[]}"#), Err(ApiError::Parse(_))));
    assert!(matches!(parse_note_listing("oops"), Err(ApiError::Parse(_))));
}

#[test]
fn parse_optional_note_handles_empty_bodies() {
    assert_eq!(parse_optional_note("").unwrap(), None);
    assert_eq!(parse_optional_note("  null ").unwrap(), None);
    assert_eq!(parse_optional_note("{}").unwrap(), None);
    let note = parse_optional_note(r#"{"id":"n1","content":"x"}"#).unwrap().unwrap();
    assert_eq!(note.id.as_str(), "n1");
}

#[tokio::test]
async fn missing_token_short_circuits_without_request() {
    // Port 9 is discard; a real request would surface as Transport instead.
    let api = HttpWhiteboardApi::with_base_url("http://127.0.0.1:9/", Arc::new(MemorySessionStore::default())).unwrap();
    assert!(matches!(api.list_boards().await, Err(ApiError::NotAuthenticated)));
    assert!(matches!(api.delete_note(&RecordId::new("1")).await, Err(ApiError::NotAuthenticated)));
}
