//! HTTP-level tests: drive the axum router the way the extension does.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use leadscout_core::LeadScoutConfig;
use leadscout_model::{
    GenerationBackend, GenerationSession, ModelConfig, ModelError, ModelSessionClient,
    UnavailableBackend,
};
use leadscout_server::routes::build_router;
use leadscout_server::AppState;
use leadscout_store::LeadStore;
use serde_json::{json, Value};
use tower::ServiceExt;

struct CannedBackend {
    reply: &'static str,
}

struct CannedSession {
    reply: &'static str,
}

#[async_trait]
impl GenerationBackend for CannedBackend {
    fn describe(&self) -> String {
        "canned model".into()
    }
    async fn is_available(&self) -> bool {
        true
    }
    fn unavailable_reason(&self) -> String {
        String::new()
    }
    async fn open(&self, _instructions: &str) -> Result<Box<dyn GenerationSession>, ModelError> {
        Ok(Box::new(CannedSession { reply: self.reply }))
    }
}

#[async_trait]
impl GenerationSession for CannedSession {
    async fn complete(&mut self, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.reply.to_string())
    }
    fn close(&mut self) {}
}

fn app_with(backend: Arc<dyn GenerationBackend>) -> (tempfile::TempDir, Router) {
    let dir = tempfile::TempDir::new().unwrap();
    let config = LeadScoutConfig::from_env(dir.path()).unwrap();
    let store = LeadStore::open(&config.data_paths.leads_file).unwrap();
    let client = ModelSessionClient::new(backend, Duration::from_secs(5));
    let state = AppState::new(config, ModelConfig::default(), store, client);
    (dir, build_router(Arc::new(state)))
}

fn app(reply: &'static str) -> (tempfile::TempDir, Router) {
    app_with(Arc::new(CannedBackend { reply }))
}

async fn send(app: &Router, body: Value, tab: Option<&str>) -> Value {
    let mut req = Request::post("/api/message")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-extension-id", "lead-extractor");
    if let Some(tab) = tab {
        req = req.header("x-tab-id", tab);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    read_json(resp.into_body()).await
}

async fn read_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_extract_then_save_round_trip() {
    let (_dir, app) = app(r#"Here you go: {"job_title":"Welder","contact_details":{"email":"hr@steel.test"}}"#);

    let extracted = send(
        &app,
        json!({"action": "extractLead", "pageContent": "Steel Co is hiring welders"}),
        Some("3"),
    )
    .await;
    assert_eq!(extracted["success"], true);
    assert_eq!(extracted["data"]["jobTitle"], "Welder");
    assert_eq!(extracted["data"]["contactEmail"], "hr@steel.test");
    assert!(extracted["data"]["company"].is_null());

    let saved = send(
        &app,
        json!({"action": "saveLead", "lead": extracted["data"], "url": "https://steel.test/jobs"}),
        None,
    )
    .await;
    assert_eq!(saved, json!({"success": true, "totalLeads": 1}));

    let listed = send(&app, json!({"action": "getStoredLeads"}), None).await;
    let lead = &listed["leads"][0];
    assert_eq!(lead["jobTitle"], "Welder");
    assert_eq!(lead["sourceUrl"], "https://steel.test/jobs");
    assert!(lead["capturedAt"].is_string());
    assert!(lead["id"].is_string());
}

#[tokio::test]
async fn test_extract_from_popup_is_rejected() {
    let (_dir, app) = app(r#"{"jobTitle":"Welder"}"#);
    let resp = send(&app, json!({"action": "extractLead", "pageContent": "p"}), None).await;
    assert_eq!(
        resp,
        json!({"success": false, "error": "Invalid message or sender", "errorKind": "invalidRequest"})
    );
}

#[tokio::test]
async fn test_missing_sender_header() {
    let (_dir, app) = app("{}");
    let resp = app
        .oneshot(
            Request::post("/api/message")
                .body(Body::from(r#"{"action":"getStoredLeads"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(resp.into_body()).await;
    assert_eq!(body["errorKind"], "invalidRequest");
}

#[tokio::test]
async fn test_unparseable_body_still_answered() {
    let (_dir, app) = app("{}");
    let resp = app
        .oneshot(
            Request::post("/api/message")
                .header("x-extension-id", "lead-extractor")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorKind"], "invalidRequest");
}

#[tokio::test]
async fn test_unavailable_model_reports_guidance() {
    let (_dir, app) = app_with(Arc::new(UnavailableBackend::new(
        "Start the local model server and retry",
    )));
    let resp = send(&app, json!({"action": "extractLead", "pageContent": "p"}), Some("1")).await;
    assert_eq!(resp["errorKind"], "capabilityUnavailable");
    assert_eq!(resp["error"], "Start the local model server and retry");
}

#[tokio::test]
async fn test_delete_and_clear() {
    let (_dir, app) = app("{}");
    for title in ["A", "B", "C"] {
        send(&app, json!({"action": "saveLead", "lead": {"jobTitle": title}, "url": "u"}), None).await;
    }

    let resp = send(&app, json!({"action": "deleteLead", "index": 1}), None).await;
    assert_eq!(resp["totalLeads"], 2);
    let listed = send(&app, json!({"action": "getStoredLeads"}), None).await;
    let titles: Vec<&str> = listed["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["jobTitle"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "A"]);

    let resp = send(&app, json!({"action": "deleteLead", "index": 9}), None).await;
    assert_eq!(resp["errorKind"], "indexOutOfRange");

    let resp = send(&app, json!({"action": "clearLeads"}), None).await;
    assert_eq!(resp, json!({"success": true}));
    let listed = send(&app, json!({"action": "getStoredLeads"}), None).await;
    assert_eq!(listed, json!({"success": true, "leads": []}));
}

#[tokio::test]
async fn test_exports() {
    let (_dir, app) = app("{}");
    send(
        &app,
        json!({"action": "saveLead", "lead": {"jobTitle": "Porter", "company": "Hotel, Inc"}, "url": "https://hotel.test"}),
        None,
    )
    .await;

    let (status, content_type, csv) = get_text(&app, "/api/leads/export.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/csv"));
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with(r#""Job Title","Company""#));
    assert!(lines.next().unwrap().starts_with(r#""Porter","Hotel, Inc","""#));

    let (status, _, text) = get_text(&app, "/api/leads/export.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.starts_with("Job Title: Porter\nCompany: Hotel, Inc\n"));
    assert!(text.ends_with("URL: https://hotel.test\n---"));
}

#[tokio::test]
async fn test_status() {
    let (_dir, app) = app("{}");
    let (status, _, body) = get_text(&app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["service"], "leadscout");
    assert_eq!(body["model"]["target"], "canned model");
    assert_eq!(body["model"]["available"], true);
    assert_eq!(body["leads"], 0);
}
