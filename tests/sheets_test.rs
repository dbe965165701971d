// Spreadsheet loader tests against a mock HTTP endpoint
use coachgen::sheets::{spreadsheet_id_from_url, SheetsClient, SheetsError};
use coachgen::table::AGENT_COLUMN;
use serde_json::json;

fn sheet_url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit#gid=0", id)
}

#[tokio::test]
async fn test_fetch_table_parses_first_worksheet() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "range": "Sheet1!A1:ZZ1000",
        "majorDimension": "ROWS",
        "values": [
            [AGENT_COLUMN, "Skill Performance Area Missed 1", "Strength 1"],
            ["Doe, Jane", "rushed close", "warm tone"],
            ["Smith, Al", "", "clear recap"],
            ["Doe, Jane", 42, true]
        ]
    });
    let mock = server
        .mock("GET", "/v4/spreadsheets/sheet123/values/A1:ZZ")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client =
        SheetsClient::with_base_url("test-token".to_string(), server.url(), 5).unwrap();
    let table = client.fetch_table(&sheet_url("sheet123")).await.unwrap();

    mock.assert_async().await;
    assert!(table.has_column(AGENT_COLUMN));
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.unique_agents(), vec!["Doe, Jane", "Smith, Al"]);

    // Non-string cells arrive as text, untyped.
    let rows = table.agent_rows("Doe, Jane", 5);
    assert_eq!(
        table.collect_fields(&rows, "Skill Performance Area Missed"),
        vec!["rushed close", "42"]
    );
}

#[tokio::test]
async fn test_fetch_table_surfaces_api_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v4/spreadsheets/denied/values/A1:ZZ")
        .with_status(403)
        .with_body(r#"{"error": {"status": "PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let client = SheetsClient::with_base_url("tok".to_string(), server.url(), 5).unwrap();
    let err = client.fetch_table(&sheet_url("denied")).await.unwrap_err();
    match err {
        SheetsError::Api { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_table_empty_sheet_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    // No "values" key at all: an empty worksheet.
    let _mock = server
        .mock("GET", "/v4/spreadsheets/empty/values/A1:ZZ")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"range": "Sheet1!A1:ZZ1000", "majorDimension": "ROWS"}"#)
        .create_async()
        .await;

    let client = SheetsClient::with_base_url("tok".to_string(), server.url(), 5).unwrap();
    let err = client.fetch_table(&sheet_url("empty")).await.unwrap_err();
    assert!(matches!(err, SheetsError::EmptySheet));
}

#[tokio::test]
async fn test_fetch_table_rejects_non_sheet_url() {
    let client = SheetsClient::with_base_url(
        "tok".to_string(),
        "http://127.0.0.1:9".to_string(),
        1,
    )
    .unwrap();
    let err = client
        .fetch_table("https://example.com/not-a-sheet")
        .await
        .unwrap_err();
    assert!(matches!(err, SheetsError::InvalidUrl(_)));
}

#[test]
fn test_spreadsheet_id_extraction() {
    assert_eq!(
        spreadsheet_id_from_url(&sheet_url("abc123")).unwrap(),
        "abc123"
    );
    assert!(spreadsheet_id_from_url("https://example.com").is_err());
}
