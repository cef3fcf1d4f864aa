//! InspireVault RPC Server: JSON-RPC over stdin/stdout for a presentation layer.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.like", "params":{"id":3}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use inspirevault::app::App;
use inspirevault::logging;
use inspirevault::rpc_handler::{dispatch_request, Dispatched};
use inspirevault::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Simple rate limiter: max requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// Responses queued for the stdout writer.
const RESPONSE_QUEUE: usize = 256;

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    stdout.write_all(value.to_string().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

/// Single owner of stdout: each response is written as one whole line.
async fn run_writer(mut rx: mpsc::Receiver<Value>) -> io::Result<()> {
    let mut stdout = io::stdout();
    while let Some(response) = rx.recv().await {
        write_line(&mut stdout, &response).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_engine = SettingsEngine::new(std::env::args().nth(1));
    let loaded = settings_engine.load();
    logging::init(&settings_engine.get_settings().logging.level);
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "falling back to default settings");
    }

    let app = App::with_settings(settings_engine)?;
    tracing::info!(config = app.settings_engine.get_config_path(), "inspirevault-rpc starting");
    let app = Arc::new(Mutex::new(app));

    let (tx, rx) = mpsc::channel::<Value>(RESPONSE_QUEUE);
    let writer = tokio::spawn(run_writer(rx));
    tx.send(json!({"event":"ready","version":env!("CARGO_PKG_VERSION")})).await?;

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                tx.send(json!({"id":null,"error":format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        if !rate_limiter.check() {
            let id = req.get("id").cloned().unwrap_or(Value::Null);
            tx.send(json!({"id": id, "error": "rate limit exceeded"})).await?;
            continue;
        }

        // Requests are applied in arrival order; only a pending save or
        // metadata fetch moves to its own task.
        match dispatch_request(&app, &req).await {
            Dispatched::Ready(response) => tx.send(response).await?,
            Dispatched::Pending(pending) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if tx.send(pending.await).await.is_err() {
                        tracing::warn!("stdout writer closed, dropping response");
                    }
                });
            }
        }
    }

    tracing::info!("stdin closed, waiting for in-flight requests");
    // The writer finishes once every in-flight task has sent its response.
    drop(tx);
    writer.await??;
    Ok(())
}
