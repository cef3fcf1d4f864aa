//! RPC method handler for the InspireVault JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! store, the category filter and the form via the `App` struct.
//! `handle_request` wraps it into a full response line. The server instead
//! calls `dispatch_request` in arrival order: everything up to the save or
//! metadata fetch is applied before the next request is read, and only that
//! wait is handed back as a future for the server to spawn.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::{begin_paste_autofill, begin_submit_form, paste_autofill, submit_form, App};
use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::managers::category_filter::CategoryFilterTrait;
use crate::services::clipboard::ProvidedClipboard;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{Bookmark, PageMetadata};
use crate::types::errors::{BookmarkError, FormError};
use crate::types::form::FormField;

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

/// Handle one parsed request object and build its response.
///
/// The response carries the request's `id` (or `null`) and either `result`
/// or `error`.
pub async fn handle_request(app: &Mutex<App>, req: &Value) -> Value {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or(json!({}));
    tracing::debug!(method, "rpc request");

    response(id, handle_method(app, method, &params).await)
}

/// A response that is either complete or still waiting on a collaborator.
pub enum Dispatched {
    Ready(Value),
    Pending(Pin<Box<dyn Future<Output = Value> + Send>>),
}

fn response(id: Value, outcome: Result<Value, String>) -> Value {
    match outcome {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

/// Apply one request up to its first slow step.
///
/// `form.submit` and `form.paste` lock the form before returning and leave the
/// save or metadata fetch in [`Dispatched::Pending`]. Every other method is
/// answered in full.
pub async fn dispatch_request(app: &Arc<Mutex<App>>, req: &Value) -> Dispatched {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or(json!({}));

    match method {
        "form.submit" => {
            tracing::debug!(method, "rpc request");
            match begin_submit_form(app).await {
                Ok(pending) => {
                    let app = Arc::clone(app);
                    Dispatched::Pending(Box::pin(async move {
                        let outcome = pending.finish(&app).await;
                        response(id, submit_result(outcome))
                    }))
                }
                Err(err) => Dispatched::Ready(response(id, submit_result(Err(err)))),
            }
        }
        "form.paste" => {
            tracing::debug!(method, "rpc request");
            let clipboard = clipboard_from(&params);
            match begin_paste_autofill(app, &clipboard).await {
                Ok(Some(pending)) => {
                    let app = Arc::clone(app);
                    Dispatched::Pending(Box::pin(async move {
                        let filled = pending.finish(&app).await;
                        response(id, paste_result(&app, filled).await)
                    }))
                }
                Ok(None) => Dispatched::Ready(response(id, paste_result(app, Ok(None)).await)),
                Err(err) => Dispatched::Ready(response(id, Err(err.to_string()))),
            }
        }
        _ => Dispatched::Ready(handle_request(app, req).await),
    }
}

fn submit_result(outcome: Result<Bookmark, FormError>) -> Result<Value, String> {
    match outcome {
        Ok(bookmark) => Ok(json!({
            "bookmark": bookmark,
            "message": "Bookmark saved successfully!"
        })),
        // Validation failures are an expected outcome: the caller needs the
        // per-field messages, not just the aggregate one.
        Err(err) => match &err {
            FormError::Validation(errors) => Ok(json!({
                "errors": errors,
                "message": err.to_string()
            })),
            _ => Err(err.to_string()),
        },
    }
}

fn clipboard_from(params: &Value) -> ProvidedClipboard {
    match str_param(params, "text") {
        Some(text) => ProvidedClipboard::with_text(text),
        None => ProvidedClipboard::unavailable(
            str_param(params, "error").unwrap_or("no clipboard access"),
        ),
    }
}

async fn paste_result(
    app: &Mutex<App>,
    filled: Result<Option<PageMetadata>, FormError>,
) -> Result<Value, String> {
    let filled = filled.map_err(|e| e.to_string())?;
    let a = app.lock().await;
    let form = serde_json::to_value(a.form.view()).map_err(|e| e.to_string())?;
    let message = filled.as_ref().map(|_| "Metadata extracted successfully");
    Ok(json!({"filled": filled.is_some(), "form": form, "message": message}))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Categories ───
        "category.list" => {
            let a = app.lock().await;
            let categories: Vec<Value> = a
                .categories
                .categories()
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id, "name": c.name, "active": c.active,
                        "icon": c.icon, "asset": c.icon.asset_name()
                    })
                })
                .collect();
            Ok(json!(categories))
        }
        "category.select" => {
            let id = str_param(params, "id").ok_or("missing id")?;
            let mut a = app.lock().await;
            a.select_category(id).map_err(|e| e.to_string())?;
            let items = serde_json::to_value(a.filtered_bookmarks()).map_err(|e| e.to_string())?;
            Ok(json!({"active": id, "items": items}))
        }

        // ─── Bookmarks ───
        "bookmark.list" => {
            let a = app.lock().await;
            let items = serde_json::to_value(a.filtered_bookmarks()).map_err(|e| e.to_string())?;
            Ok(json!({"active": a.categories.active_category(), "items": items}))
        }
        "bookmark.all" => {
            let a = app.lock().await;
            serde_json::to_value(a.store.list_bookmarks()).map_err(|e| e.to_string())
        }
        "bookmark.get" => {
            let id = params.get("id").and_then(|v| v.as_u64()).ok_or("missing id")?;
            let a = app.lock().await;
            let bookmark = a
                .store
                .get_bookmark(id)
                .ok_or_else(|| BookmarkError::NotFound(id).to_string())?;
            serde_json::to_value(bookmark).map_err(|e| e.to_string())
        }
        "bookmark.like" => {
            let id = params.get("id").and_then(|v| v.as_u64()).ok_or("missing id")?;
            let mut a = app.lock().await;
            let likes = a.like_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "likes": likes, "message": "Bookmark liked!"}))
        }

        // ─── Form ───
        "form.state" => {
            let a = app.lock().await;
            serde_json::to_value(a.form.view()).map_err(|e| e.to_string())
        }
        "form.expand" => {
            let mut a = app.lock().await;
            a.form.expand();
            serde_json::to_value(a.form.view()).map_err(|e| e.to_string())
        }
        "form.toggle" => {
            let mut a = app.lock().await;
            a.form.toggle();
            serde_json::to_value(a.form.view()).map_err(|e| e.to_string())
        }
        "form.collapse" => {
            let mut a = app.lock().await;
            a.form.cancel();
            serde_json::to_value(a.form.view()).map_err(|e| e.to_string())
        }
        "form.set_field" => {
            let field: FormField = str_param(params, "field").ok_or("missing field")?.parse()?;
            let value = str_param(params, "value").ok_or("missing value")?;
            let mut a = app.lock().await;
            a.form.set_field(field, value).map_err(|e| e.to_string())?;
            serde_json::to_value(a.form.view()).map_err(|e| e.to_string())
        }
        "form.validate" => {
            let a = app.lock().await;
            let errors = a.form.validate(&a.categories);
            Ok(json!({"valid": errors.is_empty(), "errors": errors}))
        }
        "form.submit" => submit_result(submit_form(app).await),
        "form.paste" => {
            let clipboard = clipboard_from(params);
            let filled = paste_autofill(app, &clipboard).await;
            paste_result(app, filled).await
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
