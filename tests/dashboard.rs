use std::fs;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use kyva_analytics::curate::{run_ingestion, CurationOptions};
use kyva_analytics::dashboard::{router, AppState};
use kyva_analytics::ingestion::IngestionOptions;
use kyva_analytics::layout::DataLayout;

fn state_for(data: &Path) -> AppState {
    AppState::new(DataLayout::new(data), IngestionOptions::default())
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn seeded_data_dir(root: &Path) -> std::path::PathBuf {
    let data = root.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::copy("tests/fixtures/people.csv", data.join("people.csv")).unwrap();
    data
}

#[tokio::test]
async fn empty_data_dir_shows_a_warning() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(state_for(&root.path().join("data")), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No data found"));
    assert!(!body.contains("<select"));
}

#[tokio::test]
async fn page_previews_the_first_listed_file() {
    let root = tempfile::tempdir().unwrap();
    let data = seeded_data_dir(root.path());
    run_ingestion(&DataLayout::new(&data), &CurationOptions::default()).unwrap();

    let (status, body) = get(state_for(&data), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("KYVA Attendance &amp; Engagement"));
    assert!(body.contains(" selected>people.parquet</option>"));
    assert!(body.contains(r#"<option value="people.csv">people.csv</option>"#));
    assert!(body.contains("<code>people.parquet</code>"));
    assert!(body.contains("<strong>Rows:</strong> 2"));
    assert!(body.contains("<td>Ada</td>"));
    assert!(body.contains("<details>"));
    assert!(body.contains("<td>score</td><td>float64</td><td>1</td><td>1</td>"));
}

#[tokio::test]
async fn file_query_selects_a_listed_file() {
    let root = tempfile::tempdir().unwrap();
    let data = seeded_data_dir(root.path());

    let (status, body) = get(state_for(&data), "/?file=people.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<code>people.csv</code>"));
}

#[tokio::test]
async fn unlisted_files_are_not_found() {
    let root = tempfile::tempdir().unwrap();
    let data = seeded_data_dir(root.path());

    let (status, _) = get(state_for(&data), "/?file=..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_files_are_server_errors() {
    let root = tempfile::tempdir().unwrap();
    let data = seeded_data_dir(root.path());
    fs::write(data.join("broken.csv"), "a,b\n1,2,3\n").unwrap();

    let (status, body) = get(state_for(&data), "/?file=broken.csv").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("malformed csv"));
}

#[tokio::test]
async fn json_endpoints_mirror_the_page() {
    let root = tempfile::tempdir().unwrap();
    let data = seeded_data_dir(root.path());

    let (status, body) = get(state_for(&data), "/api/files").await;
    assert_eq!(status, StatusCode::OK);
    let files: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(files[0]["key"], "people.csv");
    assert_eq!(files[0]["kind"], "source");

    let (status, body) = get(state_for(&data), "/api/preview?file=people.csv").await;
    assert_eq!(status, StatusCode::OK);
    let preview: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(preview["rows"], 2);
    assert_eq!(preview["head"][1][2], serde_json::Value::Null);
    assert_eq!(preview["summary"][3]["dtype"], "bool");

    let (status, _) = get(state_for(&data), "/health").await;
    assert_eq!(status, StatusCode::OK);
}
