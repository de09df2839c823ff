//! End-to-end tests against a stub backend served by axum on a random port.
//!
//! The library tests drive [`HttpBackend`] and the controllers directly; the
//! binary tests run the built `twin` executable with a temporary config.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use twin_console::api::{Backend, HttpBackend};
use twin_console::ask::{AskController, ERROR_TEXT};
use twin_console::catalog::QueryCatalogController;
use twin_console::config::{BackendConfig, ToastConfig};
use twin_console::models::{BulkAskItem, SearchFilters};
use twin_console::outcome::Outcome;
use twin_console::search::SearchController;
use twin_console::ui::Feedback;
use twin_console::view::layout::PageKind;
use twin_console::view::{ids, ElementId, MemoryPage, View};

// ============ Stub backend ============

fn stub_router() -> Router {
    Router::new()
        .route(
            "/api/health",
            get(|| async {
                Json(json!({"status": "ok", "index_ready": true, "groq_ready": false}))
            }),
        )
        .route(
            "/api/sample-queries",
            get(|| async {
                Json(json!({"queries": [
                    {"id": "q1", "text": "What is your strongest skill?", "behavioral": false},
                    {"id": "q2", "text": "Tell me about a conflict.", "behavioral": true},
                    {"id": "q 3", "text": "Why this role?"}
                ]}))
            }),
        )
        .route("/api/search", get(search))
        .route("/api/ask", post(ask))
        .route("/api/bulk-ask", post(bulk_ask))
        .route(
            "/api/profile-data",
            get(|| async {
                Json(json!({
                    "personal": {"name": "Alex Doe", "title": "Data Analyst"},
                    "contact": {"email": "[redacted email]"},
                    "skills": {"technical": ["SQL", "Python"]},
                    "methodology_stories": [{}]
                }))
            }),
        )
}

/// Echoes the received parameters in the single hit it returns.
async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    if q == "nothing" {
        return Json(json!({"results": []}));
    }
    let category = params.get("category").cloned().unwrap_or_default();
    let tag = params.get("tag").cloned().unwrap_or_default();
    Json(json!({"results": [
        {"title": format!("q={} category={} tag={}", q, category, tag), "content": "x".repeat(400), "score": 0.87654},
        {"title": "<b>second</b>", "content": null, "score": 0.5}
    ]}))
}

async fn ask(Json(body): Json<Value>) -> Json<Value> {
    let question = body["question"].as_str().unwrap_or_default().to_string();
    Json(json!({"answer": format!("You asked: {}", question)}))
}

async fn bulk_ask(Json(body): Json<Value>) -> Json<Value> {
    let items = body["items"].as_array().cloned().unwrap_or_default();
    let results: Vec<Value> = items
        .iter()
        .map(|item| json!({"id": item["id"], "answer": format!("A:{}", item["question"].as_str().unwrap_or_default())}))
        .collect();
    Json(json!({"results": results}))
}

fn failing_router() -> Router {
    async fn fail() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    Router::new()
        .route("/api/health", get(fail))
        .route("/api/sample-queries", get(fail))
        .route("/api/search", get(fail))
        .route("/api/ask", post(fail))
        .route("/api/bulk-ask", post(fail))
        .route("/api/profile-data", get(fail))
}

/// Serves `router` on its own thread and runtime; returns the base URL.
fn spawn_stub(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

fn backend(base_url: &str) -> Arc<dyn Backend> {
    Arc::new(
        HttpBackend::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
        })
        .unwrap(),
    )
}

fn page(kind: PageKind) -> (Arc<MemoryPage>, Feedback) {
    let page = Arc::new(MemoryPage::new());
    kind.build(page.as_ref());
    let feedback = Feedback::new(page.clone(), &ToastConfig::default());
    (page, feedback)
}

fn text(page: &MemoryPage, id: &str) -> String {
    page.text(&ElementId::new(id)).unwrap_or_default()
}

// ============ HTTP contract ============

#[tokio::test]
async fn test_health_fields_decode() {
    let base = spawn_stub(stub_router());
    let health = backend(&base).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.index_ready, Some(true));
    assert_eq!(health.groq_ready, Some(false));
}

#[tokio::test]
async fn test_search_params_are_url_encoded() {
    let base = spawn_stub(stub_router());
    let filters = SearchFilters {
        category: Some("experience".to_string()),
        tag: Some("c#".to_string()),
    };
    let hits = backend(&base)
        .search("rust & go?", &filters)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "q=rust & go? category=experience tag=c#");
    assert_eq!(hits[1].content, "");
}

#[tokio::test]
async fn test_bulk_ask_echoes_ids() {
    let base = spawn_stub(stub_router());
    let items = vec![
        BulkAskItem {
            id: "a".to_string(),
            question: "one".to_string(),
        },
        BulkAskItem {
            id: "b".to_string(),
            question: "two".to_string(),
        },
    ];
    let results = backend(&base).bulk_ask(items).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].id.as_deref(), Some("b"));
    assert_eq!(results[1].answer, "A:two");
}

#[tokio::test]
async fn test_server_error_is_operation_error() {
    let base = spawn_stub(failing_router());
    let err = backend(&base).ask("hello").await.unwrap_err();
    assert!(!err.is_validation());
    assert!(err.to_string().starts_with("POST /api/ask"));
}

// ============ Controllers over HTTP ============

#[tokio::test]
async fn test_ask_flow_renders_answer() {
    let base = spawn_stub(stub_router());
    let (page, feedback) = page(PageKind::Main);
    let ctl = AskController::new(page.clone(), backend(&base), feedback);

    assert_eq!(ctl.submit("  Why Rust?  ").await, Outcome::Done);
    assert_eq!(text(&page, ids::ANSWER_BOX), "You asked: Why Rust?");
    assert_eq!(text(&page, ids::STATUS), "Ready");
}

#[tokio::test]
async fn test_ask_failure_shows_error_text() {
    let base = spawn_stub(failing_router());
    let (page, feedback) = page(PageKind::Main);
    let ctl = AskController::new(page.clone(), backend(&base), feedback);

    assert!(matches!(ctl.submit("Why Rust?").await, Outcome::Failed(_)));
    assert_eq!(text(&page, ids::ANSWER_BOX), ERROR_TEXT);
    assert_eq!(text(&page, ids::STATUS), "Ready");
}

#[tokio::test]
async fn test_search_flow_truncates_and_escapes() {
    let base = spawn_stub(stub_router());
    let (page, feedback) = page(PageKind::Main);
    let ctl = SearchController::new(page.clone(), backend(&base), feedback, 220);

    assert_eq!(
        ctl.submit("leadership", &SearchFilters::default()).await,
        Outcome::Done
    );
    let html = page
        .content(&ElementId::new(ids::SEARCH_RESULTS))
        .unwrap()
        .html();
    assert!(html.contains("0.877"));
    assert!(html.contains("&lt;b&gt;second&lt;/b&gt;"));
    assert!(html.contains(&format!("{}…", "x".repeat(220))));
    assert!(!html.contains(&"x".repeat(221)));
}

#[tokio::test]
async fn test_catalog_load_and_run_all() {
    let base = spawn_stub(stub_router());
    let (page, feedback) = page(PageKind::Testing);
    let ctl = QueryCatalogController::new(page.clone(), backend(&base), feedback);

    assert_eq!(ctl.load_queries().await, Outcome::Done);
    assert_eq!(page.is_disabled(&ElementId::new(ids::RUN_ALL)), Some(false));

    let session = ctl.session();
    assert_eq!(session.queries().len(), 3);
    assert_eq!(session.cell("q 3").unwrap().as_str(), "ans-q_3");

    assert_eq!(ctl.run_all().await, Outcome::Done);
    assert_eq!(text(&page, ids::PROGRESS), "3/3");
    let cell = session.cell("q2").unwrap();
    assert_eq!(
        page.text(cell).as_deref(),
        Some("A:Tell me about a conflict.")
    );

    assert_eq!(ctl.run_single("q1").await, Outcome::Done);
    let cell = session.cell("q1").unwrap();
    assert_eq!(
        page.text(cell).as_deref(),
        Some("You asked: What is your strongest skill?")
    );
}

// ============ Binary ============

fn twin_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("twin");
    path
}

fn setup_test_env(base_url: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[backend]
base_url = "{}"
timeout_secs = 5

[toast]
timeout_ms = 3500
grace_ms = 380

[search]
snippet_chars = 40
"#,
        base_url
    );

    let config_path = config_dir.join("twin.toml");
    fs::write(&config_path, config_content).unwrap();
    (tmp, config_path)
}

fn run_twin(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = twin_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run twin binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_cli_health() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, stderr, success) = run_twin(&config_path, &["health"]);
    assert!(success, "health failed: {}", stderr);
    assert!(stdout.contains("status:      ok"));
    assert!(stdout.contains("index_ready: true"));
}

#[test]
fn test_cli_ask_prints_answer_and_toast() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, stderr, success) = run_twin(&config_path, &["ask", "Hello?"]);
    assert!(success, "ask failed: {}", stderr);
    assert!(stdout.contains("You asked: Hello?"));
    assert!(stderr.contains("[success] Answer ready."));
}

#[test]
fn test_cli_ask_rejects_blank_question() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (_stdout, stderr, success) = run_twin(&config_path, &["ask", "   "]);
    assert!(!success);
    assert!(stderr.contains("Please enter a question."));
}

#[test]
fn test_cli_search_empty_results() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, stderr, success) = run_twin(&config_path, &["search", "nothing"]);
    assert!(success, "search failed: {}", stderr);
    assert!(stdout.contains("(no matches)"));
}

#[test]
fn test_cli_run_all_reports_progress() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, stderr, success) =
        run_twin(&config_path, &["run-all", "--progress", "json"]);
    assert!(success, "run-all failed: {}", stderr);
    assert!(stdout.contains("progress: 3/3"));
    assert!(stdout.contains("-> A:Why this role?"));
    assert!(stderr.contains(r#""n":3"#));
}

#[test]
fn test_cli_run_unknown_id_fails() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (_stdout, stderr, success) = run_twin(&config_path, &["run", "missing"]);
    assert!(!success);
    assert!(stderr.contains("no catalog query with id: missing"));
}

#[test]
fn test_cli_tabs_select() {
    let base = spawn_stub(stub_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, _stderr, success) = run_twin(&config_path, &["tabs", "--select", "search"]);
    assert!(success);
    assert!(stdout.contains("* search"));
    assert!(stdout.contains("  ask"));

    let (_stdout, _stderr, success) = run_twin(&config_path, &["tabs", "--select", "nope"]);
    assert!(!success);
}

#[test]
fn test_cli_backend_down_fails() {
    let base = spawn_stub(failing_router());
    let (_tmp, config_path) = setup_test_env(&base);

    let (stdout, stderr, success) = run_twin(&config_path, &["profile"]);
    assert!(!success);
    assert!(stdout.contains("(error)"));
    assert!(stderr.contains("[error]"));
}

#[test]
fn test_cli_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("twin.toml");
    fs::write(&config_path, "[toast]\ngrace_ms = 10\n").unwrap();

    let (_stdout, stderr, success) = run_twin(&config_path, &["health"]);
    assert!(!success);
    assert!(stderr.contains("grace_ms"));
}
