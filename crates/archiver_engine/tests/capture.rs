use std::sync::Arc;

use archiver_engine::{
    archive_endpoint, ErrorLog, FetchSettings, OutputLayout, ReqwestFetcher, TimestampFn,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixed_clock() -> TimestampFn {
    Arc::new(|| "2024-01-01T00:00:00.000Z".to_string())
}

fn setup(temp: &tempfile::TempDir) -> (OutputLayout, Arc<ErrorLog>) {
    let layout = OutputLayout::new(temp.path().join("backup"));
    layout.ensure_all().unwrap();
    let errors = Arc::new(ErrorLog::new(layout.error_log_path(), fixed_clock()));
    (layout, errors)
}

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("client builds")
}

#[tokio::test]
async fn json_capture_round_trips_meta_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/status", server.uri())).unwrap();

    let written = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .expect("capture ok");

    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("json"));
    let contents = std::fs::read_to_string(&written).unwrap();
    // Pretty-printed with two-space indentation.
    assert!(contents.contains("\n  \""), "not pretty printed: {contents}");

    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["meta"]["url"], serde_json::json!(url.as_str()));
    assert_eq!(parsed["meta"]["status"], serde_json::json!(200));
    assert_eq!(parsed["meta"]["contentType"], serde_json::json!("application/json"));
    assert_eq!(parsed["meta"]["headers"]["content-type"], serde_json::json!("application/json"));
    assert_eq!(parsed["body"], serde_json::json!({"ok": true}));

    // Success leaves the error log untouched.
    assert!(!layout.error_log_path().exists());
}

#[tokio::test]
async fn error_status_still_captures_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(r#"{"ok":false}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/status", server.uri())).unwrap();

    let written = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .expect("capture ok");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(parsed["meta"]["status"], serde_json::json!(500));
    assert_eq!(parsed["body"], serde_json::json!({"ok": false}));

    let log = std::fs::read_to_string(layout.error_log_path()).unwrap();
    assert_eq!(
        log,
        format!("[2024-01-01T00:00:00.000Z] [ENDPOINT] 500 {url}\n")
    );
}

#[tokio::test]
async fn non_json_bodies_get_the_text_layout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/motd"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("hello world", "text/plain"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/motd", server.uri())).unwrap();

    let written = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .expect("capture ok");

    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("txt"));
    let contents = std::fs::read_to_string(&written).unwrap();
    assert_eq!(
        contents,
        format!("URL: {url}\nStatus: 200\nContent-Type: text/plain\n\n----- BODY -----\nhello world\n")
    );
}

#[tokio::test]
async fn unparseable_json_falls_back_to_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{oops", "application/json"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/broken", server.uri())).unwrap();

    let written = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .expect("capture ok");

    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("txt"));
    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.ends_with("----- BODY -----\n{oops\n"));
}

#[tokio::test]
async fn capture_names_carry_the_slug_and_a_response_digest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{}"#, "application/json"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/status", server.uri())).unwrap();

    let written = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .expect("capture ok");

    let name = written.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains("-v1-status_response_"), "got {name}");
    assert!(written.starts_with(layout.dir_for(archiver_core::UrlKind::Endpoint)));
}

#[tokio::test]
async fn reprocessing_the_same_url_keeps_both_captures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"n":1}"#, "application/json"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let (layout, errors) = setup(&temp);
    let url = Url::parse(&format!("{}/v1/status", server.uri())).unwrap();

    let first = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .unwrap();
    let second = archive_endpoint(&fetcher(), &layout, &errors, &url)
        .await
        .unwrap();

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}
