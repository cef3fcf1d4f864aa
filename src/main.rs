//! InspireVault console demo.
//!
//! Walks through the vault core the way a presentation layer would drive it:
//! browse by category, like a card, fill and submit the add-bookmark form,
//! paste a URL for auto-fill. The `inspirevault-rpc` binary exposes the same
//! operations over stdin/stdout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use inspirevault::app::{paste_autofill, submit_form, App};
use inspirevault::logging;
use inspirevault::managers::bookmark_store::BookmarkStoreTrait;
use inspirevault::managers::category_filter::CategoryFilterTrait;
use inspirevault::services::bookmark_saver::SimulatedSaver;
use inspirevault::services::clipboard::ProvidedClipboard;
use inspirevault::services::metadata_extractor::MockMetadataExtractor;
use inspirevault::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use inspirevault::types::errors::FormError;
use inspirevault::types::form::FormField;

type DemoResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> DemoResult {
    let mut settings_engine = SettingsEngine::new(std::env::args().nth(1));
    let loaded = settings_engine.load();
    logging::init(&settings_engine.get_settings().logging.level);
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "falling back to default settings");
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              InspireVault v{} — Demo Mode                 ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // Short simulated latencies keep the demo snappy.
    let app = Mutex::new(App::from_parts(
        settings_engine,
        Arc::new(SimulatedSaver::new(Duration::from_millis(300))),
        Arc::new(MockMetadataExtractor::new(Duration::from_millis(300))),
    ));

    demo_browse(&app).await?;
    demo_like(&app).await?;
    demo_form_validation(&app).await?;
    demo_form_submit(&app).await?;
    demo_paste_autofill(&app).await?;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo finished.");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

async fn print_view(app: &Mutex<App>) {
    let a = app.lock().await;
    println!("  [{}] {} card(s)", a.categories.active_category(), a.filtered_bookmarks().len());
    for b in a.filtered_bookmarks() {
        println!("    #{} {:<45} ♥ {:<4} {}", b.id, b.title, b.likes, b.category);
    }
}

async fn demo_browse(app: &Mutex<App>) -> DemoResult {
    section("Categories");
    {
        let a = app.lock().await;
        let names: Vec<&str> = a.categories.categories().iter().map(|c| c.name.as_str()).collect();
        println!("  {}", names.join(" · "));
    }
    print_view(app).await;

    app.lock().await.select_category("selfhelp")?;
    print_view(app).await;

    app.lock().await.select_category("videos")?;
    print_view(app).await;
    println!("  No bookmarks found in this category.");

    app.lock().await.select_category("all")?;
    println!();
    Ok(())
}

async fn demo_like(app: &Mutex<App>) -> DemoResult {
    section("Likes");
    let mut a = app.lock().await;
    let before = a.store.get_bookmark(3).map(|b| b.likes).unwrap_or_default();
    a.like_bookmark(3)?;
    let after = a.like_bookmark(3)?;
    println!("  Bookmark #3 liked twice: {} → {}", before, after);
    match a.like_bookmark(42) {
        Err(e) => println!("  Liking #42: {}", e),
        Ok(_) => println!("  Liking #42 unexpectedly succeeded"),
    }
    println!();
    Ok(())
}

async fn demo_form_validation(app: &Mutex<App>) -> DemoResult {
    section("Form validation");
    app.lock().await.form.expand();
    match submit_form(app).await {
        Err(FormError::Validation(errors)) => {
            println!("  {}", FormError::Validation(errors.clone()));
            for (field, message) in errors.iter() {
                println!("    {:<15} {}", field, message);
            }
        }
        other => println!("  Unexpected outcome: {:?}", other.map(|b| b.id)),
    }
    println!();
    Ok(())
}

async fn demo_form_submit(app: &Mutex<App>) -> DemoResult {
    section("Form submit");
    {
        let mut a = app.lock().await;
        a.form.set_field(FormField::Url, "https://blog.rust-lang.org/inside-rust")?;
        a.form.set_field(FormField::Title, "Inside Rust Blog")?;
        a.form.set_field(FormField::Category, "coding")?;
    }
    let bookmark = submit_form(app).await?;
    println!("  Saved #{} \"{}\" on {}", bookmark.id, bookmark.title, bookmark.date_added);
    println!("  Thumbnail defaulted to placeholder: {}", !bookmark.thumbnail_image.is_empty());

    app.lock().await.select_category("coding")?;
    print_view(app).await;
    app.lock().await.select_category("all")?;
    println!();
    Ok(())
}

async fn demo_paste_autofill(app: &Mutex<App>) -> DemoResult {
    section("Paste auto-fill");
    app.lock().await.form.expand();

    let denied = ProvidedClipboard::unavailable("permission denied");
    if let Err(e) = paste_autofill(app, &denied).await {
        println!("  {}", e);
    }

    let clipboard = ProvidedClipboard::with_text("https://example.com/article");
    if let Some(meta) = paste_autofill(app, &clipboard).await? {
        println!("  Title:       {}", meta.title);
        println!("  Description: {}", meta.description);
    }
    let a = app.lock().await;
    println!("  Preview shown: {}", a.form.preview().is_some());
    println!();
    Ok(())
}
