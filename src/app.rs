//! App Core for InspireVault.
//!
//! Central struct holding the bookmark store, the category filter, the
//! add-bookmark form, the collaborators and the settings. The async flows
//! (`submit_form`, `paste_autofill`) take the app behind a `tokio` mutex and
//! release it while the saver or extractor runs, so the form's own state
//! is what refuses a second submission.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;

use crate::managers::bookmark_form::{BookmarkForm, OperationTicket};
use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::category_filter::{CategoryFilter, CategoryFilterTrait};
use crate::services::bookmark_saver::{BookmarkSaver, SimulatedSaver};
use crate::services::clipboard::ClipboardReader;
use crate::services::metadata_extractor::{MetadataExtractor, MockMetadataExtractor};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::bookmark::{Bookmark, BookmarkDraft, PageMetadata};
use crate::types::category::Category;
use crate::types::errors::{BookmarkError, CategoryError, FormError};
use crate::types::settings::{MetadataProvider, VaultSettings};

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub store: BookmarkStore,
    pub categories: CategoryFilter,
    pub form: BookmarkForm,
    saver: Arc<dyn BookmarkSaver>,
    extractor: Arc<dyn MetadataExtractor>,
}

impl App {
    /// Creates a new App from the settings file at `config_path` (or the
    /// default location), wiring collaborators according to the settings.
    ///
    /// A malformed settings file is logged and replaced by defaults.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(error = %e, "falling back to default settings");
        }
        Self::with_settings(settings_engine)
    }

    /// Creates a new App from an already loaded settings engine.
    pub fn with_settings(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = settings_engine.get_settings().clone();
        let saver: Arc<dyn BookmarkSaver> = Arc::new(SimulatedSaver::new(Duration::from_millis(
            settings.form.save_delay_ms,
        )));
        let extractor = build_extractor(&settings)?;

        Ok(Self::from_parts(settings_engine, saver, extractor))
    }

    /// Assembles an App from explicit collaborators.
    pub fn from_parts(
        settings_engine: SettingsEngine,
        saver: Arc<dyn BookmarkSaver>,
        extractor: Arc<dyn MetadataExtractor>,
    ) -> Self {
        let settings = settings_engine.get_settings();
        let store = if settings.library.seed_on_startup {
            BookmarkStore::seeded()
        } else {
            BookmarkStore::new()
        };
        let form = BookmarkForm::new(settings.form.placeholder_thumbnail.clone());

        Self {
            settings_engine,
            store,
            categories: CategoryFilter::new(Category::defaults()),
            form,
            saver,
            extractor,
        }
    }

    /// The bookmarks visible under the active category, in store order.
    pub fn filtered_bookmarks(&self) -> Vec<&Bookmark> {
        self.categories.filter(self.store.list_bookmarks())
    }

    pub fn select_category(&mut self, id: &str) -> Result<(), CategoryError> {
        self.categories.set_active_category(id)?;
        tracing::info!(category = id, "category selected");
        Ok(())
    }

    pub fn like_bookmark(&mut self, id: u64) -> Result<u64, BookmarkError> {
        let likes = self.store.like_bookmark(id)?;
        tracing::info!(id, likes, "bookmark liked");
        Ok(likes)
    }

    /// Adds a bookmark dated today. The category must be a real one.
    pub fn add_bookmark(&mut self, draft: BookmarkDraft) -> Result<Bookmark, BookmarkError> {
        self.add_bookmark_on(draft, Local::now().date_naive())
    }

    pub fn add_bookmark_on(
        &mut self,
        draft: BookmarkDraft,
        date_added: NaiveDate,
    ) -> Result<Bookmark, BookmarkError> {
        if !self.categories.is_assignable(&draft.category) {
            return Err(BookmarkError::UnknownCategory(draft.category));
        }
        Ok(self.store.add_bookmark(draft, date_added))
    }
}

fn build_extractor(
    settings: &VaultSettings,
) -> Result<Arc<dyn MetadataExtractor>, Box<dyn std::error::Error>> {
    let mock = || -> Arc<dyn MetadataExtractor> {
        Arc::new(MockMetadataExtractor::new(Duration::from_millis(
            settings.form.metadata_delay_ms,
        )))
    };

    match settings.metadata.provider {
        MetadataProvider::Mock => Ok(mock()),
        #[cfg(feature = "network")]
        MetadataProvider::Http => {
            let extractor = crate::services::metadata_extractor::HttpMetadataExtractor::new(
                Duration::from_secs(settings.metadata.request_timeout_secs),
                &settings.metadata.user_agent,
            )?;
            Ok(Arc::new(extractor))
        }
        #[cfg(not(feature = "network"))]
        MetadataProvider::Http => {
            tracing::warn!("built without the network feature, using mock metadata");
            Ok(mock())
        }
    }
}

/// A submission the form accepted, waiting on the saver.
pub struct PendingSubmit {
    ticket: OperationTicket,
    draft: BookmarkDraft,
    saver: Arc<dyn BookmarkSaver>,
}

impl PendingSubmit {
    /// Runs the save with the lock released, then applies the outcome.
    pub async fn finish(self, app: &Mutex<App>) -> Result<Bookmark, FormError> {
        tracing::info!(url = %self.draft.url, category = %self.draft.category, "saving bookmark");
        let outcome = self.saver.save_bookmark(&self.draft).await;

        let mut a = app.lock().await;
        let draft = a.form.finish_submit(self.ticket, outcome).map_err(|e| {
            tracing::warn!(error = %e, "bookmark save did not complete");
            e
        })?;
        let bookmark = a.add_bookmark(draft)?;
        tracing::info!(id = bookmark.id, "bookmark saved");
        Ok(bookmark)
    }
}

/// A metadata auto-fill the form accepted, waiting on the extractor.
pub struct PendingAutofill {
    ticket: OperationTicket,
    url: String,
    extractor: Arc<dyn MetadataExtractor>,
}

impl PendingAutofill {
    /// Runs the extraction with the lock released, then fills the form.
    pub async fn finish(self, app: &Mutex<App>) -> Result<Option<PageMetadata>, FormError> {
        tracing::info!(url = %self.url, "fetching page metadata");
        let outcome = self.extractor.extract(&self.url).await;
        let metadata = outcome.clone().ok();

        let mut a = app.lock().await;
        a.form.finish_autofill(self.ticket, outcome).map_err(|e| {
            tracing::warn!(error = %e, "metadata auto-fill did not complete");
            e
        })?;
        tracing::info!(url = %self.url, "metadata extracted");
        Ok(metadata)
    }
}

/// Validates the form and locks it for saving.
///
/// Validation failures come back as [`FormError::Validation`] with the errors
/// also recorded on the form. A call while a save is pending gets
/// [`FormError::Busy`].
pub async fn begin_submit_form(app: &Mutex<App>) -> Result<PendingSubmit, FormError> {
    let mut guard = app.lock().await;
    let a = &mut *guard;
    match a.form.begin_submit(&a.categories) {
        Ok((ticket, draft)) => Ok(PendingSubmit {
            ticket,
            draft,
            saver: a.saver.clone(),
        }),
        Err(e) => {
            tracing::info!(error = %e, "bookmark submission refused");
            Err(e)
        }
    }
}

/// Submits the add-bookmark form.
///
/// On success the saved bookmark is already at the front of the store.
pub async fn submit_form(app: &Mutex<App>) -> Result<Bookmark, FormError> {
    begin_submit_form(app).await?.finish(app).await
}

/// Reads the clipboard and, if it holds a URL, writes it into the form and
/// marks the form as fetching metadata.
///
/// Returns `Ok(None)` when the clipboard text is not a URL. A clipboard
/// failure leaves the form untouched.
pub async fn begin_paste_autofill(
    app: &Mutex<App>,
    clipboard: &dyn ClipboardReader,
) -> Result<Option<PendingAutofill>, FormError> {
    let pasted = clipboard.read_text().await.map_err(|e| {
        tracing::warn!(error = %e, "clipboard read failed");
        FormError::Clipboard(e)
    })?;

    let mut a = app.lock().await;
    match a.form.begin_autofill(&pasted)? {
        Some((ticket, url)) => Ok(Some(PendingAutofill {
            ticket,
            url,
            extractor: a.extractor.clone(),
        })),
        None => {
            tracing::debug!("clipboard text is not a URL, ignoring paste");
            Ok(None)
        }
    }
}

/// Reads the clipboard and, if it holds a URL, auto-fills the form from the
/// page's metadata.
pub async fn paste_autofill(
    app: &Mutex<App>,
    clipboard: &dyn ClipboardReader,
) -> Result<Option<PageMetadata>, FormError> {
    match begin_paste_autofill(app, clipboard).await? {
        Some(pending) => pending.finish(app).await,
        None => Ok(None),
    }
}
