//! Unit tests for the RPC handler: the JSON-RPC methods dispatched by `handle_method`.
//!
//! These tests go through the same code path as the `inspirevault-rpc` binary,
//! with zero-latency collaborators and a temporary settings file.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::{Mutex, Notify};

use inspirevault::app::App;
use inspirevault::rpc_handler::{dispatch_request, handle_method, handle_request, Dispatched};
use inspirevault::services::bookmark_saver::{BookmarkSaver, SimulatedSaver};
use inspirevault::services::metadata_extractor::{
    MetadataExtractor, MockMetadataExtractor, MOCK_TITLE,
};
use inspirevault::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use inspirevault::types::bookmark::{BookmarkDraft, PageMetadata};
use inspirevault::types::errors::{BookmarkError, MetadataError, SaveError};

fn build(
    saver: Arc<dyn BookmarkSaver>,
    extractor: Arc<dyn MetadataExtractor>,
) -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let app = App::from_parts(SettingsEngine::new(Some(path)), saver, extractor);
    (Mutex::new(app), tmp)
}

fn setup() -> (Mutex<App>, TempDir) {
    build(
        Arc::new(SimulatedSaver::new(Duration::ZERO)),
        Arc::new(MockMetadataExtractor::new(Duration::ZERO)),
    )
}

/// Saver that waits until the test releases it.
struct GatedSaver {
    gate: Arc<Notify>,
}

#[async_trait]
impl BookmarkSaver for GatedSaver {
    async fn save_bookmark(&self, _draft: &BookmarkDraft) -> Result<(), SaveError> {
        self.gate.notified().await;
        Ok(())
    }
}

/// Mock extractor that waits until the test releases it.
struct GatedExtractor {
    gate: Arc<Notify>,
    inner: MockMetadataExtractor,
}

#[async_trait]
impl MetadataExtractor for GatedExtractor {
    async fn extract(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        self.gate.notified().await;
        self.inner.extract(url).await
    }
}

/// Polls `form.state` until the form reports busy, yielding to spawned tasks.
async fn wait_until_busy(app: &Mutex<App>) -> Value {
    for _ in 0..100 {
        let state = handle_method(app, "form.state", &json!({})).await.unwrap();
        if state["busy"] == true {
            return state;
        }
        tokio::task::yield_now().await;
    }
    panic!("form never became busy");
}

async fn fill_form(app: &Mutex<App>) {
    handle_method(app, "form.expand", &json!({})).await.unwrap();
    for (field, value) in [
        ("url", "https://example.com/a"),
        ("title", "A"),
        ("category", "coding"),
    ] {
        handle_method(app, "form.set_field", &json!({"field": field, "value": value}))
            .await
            .unwrap();
    }
}

// ─── Ping ───

#[tokio::test]
async fn test_ping() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Categories ───

#[tokio::test]
async fn test_category_list() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "category.list", &json!({})).await.unwrap();
    let list = res.as_array().unwrap();
    assert_eq!(list.len(), 8);
    assert_eq!(list[0]["id"], "all");
    assert_eq!(list[0]["active"], true);
    assert_eq!(list[0]["asset"], "book-open");
}

#[tokio::test]
async fn test_category_select_filters() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "category.select", &json!({"id": "finance"}))
        .await
        .unwrap();
    assert_eq!(res["active"], "finance");
    let items = res["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "finance");

    let listed = handle_method(&app, "bookmark.list", &json!({})).await.unwrap();
    assert_eq!(listed["active"], "finance");
    assert_eq!(listed["items"], res["items"]);
}

#[tokio::test]
async fn test_category_select_unknown() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "category.select", &json!({"id": "cooking"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Category not found: cooking");
    assert!(handle_method(&app, "category.select", &json!({})).await.is_err());
}

// ─── Bookmarks ───

#[tokio::test]
async fn test_bookmark_all_uses_camel_case() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "bookmark.all", &json!({})).await.unwrap();
    let items = res.as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["id"], 1);
    assert!(items[0]["dateAdded"].is_string());
    assert!(items[0]["thumbnailImage"].is_string());
}

#[tokio::test]
async fn test_bookmark_like() {
    let (app, _tmp) = setup();
    let before = handle_method(&app, "bookmark.get", &json!({"id": 2})).await.unwrap();
    let start = before["likes"].as_u64().unwrap();

    let res = handle_method(&app, "bookmark.like", &json!({"id": 2})).await.unwrap();
    assert_eq!(res["likes"], start + 1);
    assert_eq!(res["message"], "Bookmark liked!");

    let err = handle_method(&app, "bookmark.like", &json!({"id": 99})).await.unwrap_err();
    assert_eq!(err, "Bookmark not found: 99");

    let err = handle_method(&app, "bookmark.get", &json!({"id": 99})).await.unwrap_err();
    assert_eq!(err, BookmarkError::NotFound(99).to_string());
}

// ─── Form ───

#[tokio::test]
async fn test_form_submit_flow() {
    let (app, _tmp) = setup();

    let state = handle_method(&app, "form.expand", &json!({})).await.unwrap();
    assert_eq!(state["phase"], "expanded");

    for (field, value) in [
        ("url", "https://example.com/productivity"),
        ("title", "My Tips"),
        ("category", "selfhelp"),
    ] {
        handle_method(&app, "form.set_field", &json!({"field": field, "value": value}))
            .await
            .unwrap();
    }
    let check = handle_method(&app, "form.validate", &json!({})).await.unwrap();
    assert_eq!(check["valid"], true);

    let res = handle_method(&app, "form.submit", &json!({})).await.unwrap();
    assert_eq!(res["message"], "Bookmark saved successfully!");
    assert_eq!(res["bookmark"]["id"], 7);
    assert_eq!(res["bookmark"]["likes"], 0);

    let all = handle_method(&app, "bookmark.all", &json!({})).await.unwrap();
    assert_eq!(all[0]["title"], "My Tips");

    let state = handle_method(&app, "form.state", &json!({})).await.unwrap();
    assert_eq!(state["phase"], "collapsed");
}

#[tokio::test]
async fn test_form_submit_reports_field_errors() {
    let (app, _tmp) = setup();
    handle_method(&app, "form.expand", &json!({})).await.unwrap();

    let res = handle_method(&app, "form.submit", &json!({})).await.unwrap();
    assert_eq!(res["message"], "Please fix the errors before submitting");
    assert_eq!(res["errors"]["url"], "URL is required");
    assert_eq!(res["errors"]["title"], "Title is required");
    assert_eq!(res["errors"]["category"], "Category is required");
}

#[tokio::test]
async fn test_form_set_field_errors() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "form.set_field", &json!({"field": "title", "value": "x"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Form is collapsed");

    handle_method(&app, "form.expand", &json!({})).await.unwrap();
    let err = handle_method(&app, "form.set_field", &json!({"field": "color", "value": "x"}))
        .await
        .unwrap_err();
    assert!(err.contains("unknown form field"));
}

#[tokio::test]
async fn test_form_toggle_and_collapse() {
    let (app, _tmp) = setup();
    handle_method(&app, "form.toggle", &json!({})).await.unwrap();
    handle_method(&app, "form.set_field", &json!({"field": "title", "value": "Keep"}))
        .await
        .unwrap();

    let hidden = handle_method(&app, "form.toggle", &json!({})).await.unwrap();
    assert_eq!(hidden["phase"], "collapsed");
    assert_eq!(hidden["fields"]["title"], "Keep");

    handle_method(&app, "form.toggle", &json!({})).await.unwrap();
    let closed = handle_method(&app, "form.collapse", &json!({})).await.unwrap();
    assert_eq!(closed["phase"], "collapsed");
    assert_eq!(closed["fields"]["title"], "");
}

#[tokio::test]
async fn test_form_paste() {
    let (app, _tmp) = setup();
    handle_method(&app, "form.expand", &json!({})).await.unwrap();

    let res = handle_method(&app, "form.paste", &json!({"text": "https://example.com/a"}))
        .await
        .unwrap();
    assert_eq!(res["filled"], true);
    assert_eq!(res["message"], "Metadata extracted successfully");
    assert_eq!(res["form"]["fields"]["url"], "https://example.com/a");
    assert!(res["form"]["preview"].is_object());

    let ignored = handle_method(&app, "form.paste", &json!({"text": "hello"})).await.unwrap();
    assert_eq!(ignored["filled"], false);

    let err = handle_method(&app, "form.paste", &json!({"error": "denied"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Failed to read from clipboard: denied");
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_get_and_set() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(res["form"]["save_delay_ms"], 1500);

    handle_method(
        &app,
        "settings.set",
        &json!({"key": "form.save_delay_ms", "value": 250}),
    )
    .await
    .unwrap();
    let res = handle_method(&app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(res["form"]["save_delay_ms"], 250);

    let path = app.lock().await.settings_engine.get_config_path().to_string();
    assert!(std::path::Path::new(&path).exists());

    let err = handle_method(&app, "settings.set", &json!({"key": "form.nope", "value": 1}))
        .await
        .unwrap_err();
    assert!(err.contains("Invalid settings key"));
}

// ─── Concurrent requests ───

#[tokio::test]
async fn test_request_response_carries_id() {
    let (app, _tmp) = setup();
    let res = handle_request(&app, &json!({"id": 42, "method": "ping"})).await;
    assert_eq!(res, json!({"id": 42, "result": {"pong": true}}));

    let res = handle_request(&app, &json!({"method": "nope"})).await;
    assert_eq!(res["id"], Value::Null);
    assert_eq!(res["error"], "unknown method: nope");
}

#[tokio::test]
async fn test_collapse_cancels_pending_submit() {
    let gate = Arc::new(Notify::new());
    let (app, _tmp) = build(
        Arc::new(GatedSaver { gate: gate.clone() }),
        Arc::new(MockMetadataExtractor::new(Duration::ZERO)),
    );
    let app = Arc::new(app);
    fill_form(&app).await;

    let pending = tokio::spawn({
        let app = Arc::clone(&app);
        async move { handle_request(&app, &json!({"id": 5, "method": "form.submit"})).await }
    });

    let state = wait_until_busy(&app).await;
    assert_eq!(state["phase"], "submitting");

    let again = handle_method(&app, "form.submit", &json!({})).await.unwrap_err();
    assert_eq!(again, "Form is busy");

    let closed = handle_method(&app, "form.collapse", &json!({})).await.unwrap();
    assert_eq!(closed["phase"], "collapsed");
    assert_eq!(closed["busy"], false);

    gate.notify_one();
    let response = pending.await.unwrap();
    assert_eq!(response["id"], 5);
    assert_eq!(response["error"], "Form operation cancelled");

    let all = handle_method(&app, "bookmark.all", &json!({})).await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_fields_editable_while_fetching_metadata() {
    let gate = Arc::new(Notify::new());
    let (app, _tmp) = build(
        Arc::new(SimulatedSaver::new(Duration::ZERO)),
        Arc::new(GatedExtractor {
            gate: gate.clone(),
            inner: MockMetadataExtractor::new(Duration::ZERO),
        }),
    );
    let app = Arc::new(app);
    handle_method(&app, "form.expand", &json!({})).await.unwrap();

    let pending = tokio::spawn({
        let app = Arc::clone(&app);
        async move {
            handle_request(
                &app,
                &json!({"id": 9, "method": "form.paste", "params": {"text": "example.com/page"}}),
            )
            .await
        }
    });

    let state = wait_until_busy(&app).await;
    assert_eq!(state["fetchingMetadata"], true);

    let edited = handle_method(
        &app,
        "form.set_field",
        &json!({"field": "category", "value": "design"}),
    )
    .await
    .unwrap();
    assert_eq!(edited["fields"]["category"], "design");

    let refused = handle_method(&app, "form.submit", &json!({})).await.unwrap_err();
    assert_eq!(refused, "Form is busy");

    gate.notify_one();
    let response = pending.await.unwrap();
    assert_eq!(response["id"], 9);
    assert_eq!(response["result"]["filled"], true);
    assert_eq!(response["result"]["form"]["fields"]["title"], MOCK_TITLE);
    assert_eq!(response["result"]["form"]["fields"]["category"], "design");
    assert_eq!(response["result"]["form"]["busy"], false);
}

// ─── Ordered dispatch ───

#[tokio::test]
async fn test_dispatch_locks_form_before_returning() {
    let gate = Arc::new(Notify::new());
    let (app, _tmp) = build(
        Arc::new(GatedSaver { gate: gate.clone() }),
        Arc::new(MockMetadataExtractor::new(Duration::ZERO)),
    );
    let app = Arc::new(app);
    fill_form(&app).await;

    let pending = match dispatch_request(&app, &json!({"id": 3, "method": "form.submit"})).await {
        Dispatched::Pending(pending) => pending,
        Dispatched::Ready(res) => panic!("submit answered early: {res}"),
    };

    // The next request sees the locked form without any yield in between.
    match dispatch_request(&app, &json!({"id": 4, "method": "form.state"})).await {
        Dispatched::Ready(res) => {
            assert_eq!(res["id"], 4);
            assert_eq!(res["result"]["busy"], true);
            assert_eq!(res["result"]["phase"], "submitting");
        }
        Dispatched::Pending(_) => panic!("form.state should answer at once"),
    }

    gate.notify_one();
    let response = pending.await;
    assert_eq!(response["id"], 3);
    assert_eq!(response["result"]["message"], "Bookmark saved successfully!");
    assert_eq!(response["result"]["bookmark"]["id"], 7);
}

#[tokio::test]
async fn test_dispatch_answers_refused_submit_at_once() {
    let (app, _tmp) = setup();
    let app = Arc::new(app);
    handle_method(&app, "form.expand", &json!({})).await.unwrap();

    match dispatch_request(&app, &json!({"id": 1, "method": "form.submit"})).await {
        Dispatched::Ready(res) => {
            assert_eq!(res["id"], 1);
            assert_eq!(res["result"]["errors"]["url"], "URL is required");
        }
        Dispatched::Pending(_) => panic!("invalid form should not reach the saver"),
    }

    match dispatch_request(
        &app,
        &json!({"id": 2, "method": "form.paste", "params": {"text": "hello"}}),
    )
    .await
    {
        Dispatched::Ready(res) => assert_eq!(res["result"]["filled"], false),
        Dispatched::Pending(_) => panic!("non-URL paste should not fetch metadata"),
    }
}
