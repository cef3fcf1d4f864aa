//! Add-bookmark form for InspireVault.
//!
//! Holds the user's raw input, validates it, and walks the form through its
//! lifecycle: collapsed, expanded, editing, submitting. Saving and metadata
//! fetching are asynchronous, so each is split into a `begin_*` step that
//! hands out an [`OperationTicket`] and a `finish_*` step that applies the
//! result. Closing the form invalidates outstanding tickets, which is how an
//! in-flight save or fetch gets cancelled.

use std::sync::OnceLock;

use regex::Regex;

use crate::managers::category_filter::{CategoryFilter, CategoryFilterTrait};
use crate::types::bookmark::{BookmarkDraft, PageMetadata};
use crate::types::errors::{FormError, MetadataError, SaveError};
use crate::types::form::{ErrorMap, FormField, FormFields, FormPhase, FormView};
use crate::types::settings::PLACEHOLDER_THUMBNAIL;

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "Please enter a valid URL";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const CATEGORY_INVALID: &str = "Please select a valid category";

/// Scheme optional, lowercase host with a 2-6 letter TLD, optional path.
const URL_PATTERN: &str = r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$";

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

/// Returns true if `candidate` looks like a bookmarkable URL.
pub fn is_valid_url(candidate: &str) -> bool {
    url_regex().is_match(candidate)
}

/// Validates form input against the known categories.
///
/// Only failing fields get an entry.
pub fn validate_fields(fields: &FormFields, categories: &CategoryFilter) -> ErrorMap {
    let mut errors = ErrorMap::new();

    if fields.url.is_empty() {
        errors.insert(FormField::Url, URL_REQUIRED);
    } else if !is_valid_url(&fields.url) {
        errors.insert(FormField::Url, URL_INVALID);
    }

    if fields.title.is_empty() {
        errors.insert(FormField::Title, TITLE_REQUIRED);
    }

    if fields.category.is_empty() {
        errors.insert(FormField::Category, CATEGORY_REQUIRED);
    } else if !categories.is_assignable(&fields.category) {
        errors.insert(FormField::Category, CATEGORY_INVALID);
    }

    errors
}

/// Identifies one in-flight save or metadata fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTicket(u64);

/// Form state machine.
#[derive(Debug, Clone)]
pub struct BookmarkForm {
    phase: FormPhase,
    fields: FormFields,
    errors: ErrorMap,
    show_preview: bool,
    placeholder_thumbnail: String,
    next_ticket: u64,
    pending_submit: Option<(OperationTicket, BookmarkDraft)>,
    pending_metadata: Option<OperationTicket>,
}

impl BookmarkForm {
    pub fn new(placeholder_thumbnail: impl Into<String>) -> Self {
        Self {
            phase: FormPhase::Collapsed,
            fields: FormFields::default(),
            errors: ErrorMap::new(),
            show_preview: false,
            placeholder_thumbnail: placeholder_thumbnail.into(),
            next_ticket: 0,
            pending_submit: None,
            pending_metadata: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_fetching_metadata(&self) -> bool {
        self.pending_metadata.is_some()
    }

    /// Busy indicator: a save or a metadata fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.phase == FormPhase::Submitting || self.is_fetching_metadata()
    }

    /// The candidate card shown after metadata was fetched, if any.
    pub fn preview(&self) -> Option<&FormFields> {
        (self.show_preview && !self.fields.title.is_empty()).then_some(&self.fields)
    }

    pub fn view(&self) -> FormView {
        FormView {
            phase: self.phase,
            fetching_metadata: self.is_fetching_metadata(),
            busy: self.is_busy(),
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            preview: self.preview().cloned(),
        }
    }

    pub fn expand(&mut self) {
        if self.phase == FormPhase::Collapsed {
            self.phase = FormPhase::Expanded;
        }
    }

    /// Hides the form but keeps whatever was typed.
    ///
    /// Outstanding operations keep running; a save that completes while hidden
    /// still reaches the store.
    pub fn hide(&mut self) {
        if self.phase != FormPhase::Submitting {
            self.phase = FormPhase::Collapsed;
        }
    }

    /// Expands a collapsed form, hides an expanded one.
    pub fn toggle(&mut self) {
        if self.phase == FormPhase::Collapsed {
            self.expand();
        } else {
            self.hide();
        }
    }

    /// Closes the form: clears input, errors and preview, and cancels any
    /// outstanding save or metadata fetch.
    pub fn cancel(&mut self) {
        if self.pending_submit.is_some() || self.pending_metadata.is_some() {
            tracing::debug!("form closed with an operation in flight");
        }
        self.phase = FormPhase::Collapsed;
        self.fields = FormFields::default();
        self.errors = ErrorMap::new();
        self.show_preview = false;
        self.pending_submit = None;
        self.pending_metadata = None;
    }

    /// Updates one field and clears its error.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Collapsed => return Err(FormError::NotExpanded),
            FormPhase::Submitting => return Err(FormError::Locked),
            FormPhase::Expanded | FormPhase::Editing => {}
        }
        self.fields.set(field, value);
        self.errors.remove(field);
        self.phase = FormPhase::Editing;
        Ok(())
    }

    /// Validates the current input without changing state.
    pub fn validate(&self, categories: &CategoryFilter) -> ErrorMap {
        validate_fields(&self.fields, categories)
    }

    /// Starts a submission.
    ///
    /// On validation failure the errors are recorded on the form and returned
    /// as [`FormError::Validation`]. On success the form locks its inputs and
    /// returns the draft to hand to the saver.
    pub fn begin_submit(
        &mut self,
        categories: &CategoryFilter,
    ) -> Result<(OperationTicket, BookmarkDraft), FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        if self.phase == FormPhase::Collapsed {
            return Err(FormError::NotExpanded);
        }

        let errors = self.validate(categories);
        if !errors.is_empty() {
            self.errors = errors.clone();
            self.phase = FormPhase::Editing;
            return Err(FormError::Validation(errors));
        }

        let thumbnail_image = if self.fields.thumbnail_image.is_empty() {
            self.placeholder_thumbnail.clone()
        } else {
            self.fields.thumbnail_image.clone()
        };
        let draft = BookmarkDraft {
            url: self.fields.url.clone(),
            title: self.fields.title.clone(),
            description: self.fields.description.clone(),
            category: self.fields.category.clone(),
            thumbnail_image,
        };

        let ticket = self.issue_ticket();
        self.errors = ErrorMap::new();
        self.phase = FormPhase::Submitting;
        self.pending_submit = Some((ticket, draft.clone()));
        Ok((ticket, draft))
    }

    /// Applies the saver's outcome.
    ///
    /// Success resets and collapses the form and yields the saved draft.
    /// Failure unlocks the form with the input intact.
    pub fn finish_submit(
        &mut self,
        ticket: OperationTicket,
        outcome: Result<(), SaveError>,
    ) -> Result<BookmarkDraft, FormError> {
        let draft = match self.pending_submit.take() {
            Some((pending, draft)) if pending == ticket => draft,
            other => {
                self.pending_submit = other;
                return Err(FormError::Cancelled);
            }
        };

        match outcome {
            Ok(()) => {
                self.fields = FormFields::default();
                self.errors = ErrorMap::new();
                self.show_preview = false;
                self.phase = FormPhase::Collapsed;
                Ok(draft)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                Err(FormError::Save(e))
            }
        }
    }

    /// Starts a metadata auto-fill from pasted text.
    ///
    /// The text is matched exactly as read. Text that does not look like a
    /// URL, including one with surrounding whitespace, is ignored and yields
    /// `Ok(None)`.
    /// Otherwise the URL is written into the form and the caller gets the
    /// ticket and URL to hand to the metadata extractor.
    pub fn begin_autofill(
        &mut self,
        pasted: &str,
    ) -> Result<Option<(OperationTicket, String)>, FormError> {
        match self.phase {
            FormPhase::Collapsed => return Err(FormError::NotExpanded),
            FormPhase::Submitting => return Err(FormError::Locked),
            FormPhase::Expanded | FormPhase::Editing => {}
        }
        if self.is_fetching_metadata() {
            return Err(FormError::Busy);
        }

        if pasted.is_empty() || !is_valid_url(pasted) {
            return Ok(None);
        }

        self.fields.url = pasted.to_string();
        self.errors.remove(FormField::Url);
        self.phase = FormPhase::Editing;

        let ticket = self.issue_ticket();
        self.pending_metadata = Some(ticket);
        Ok(Some((ticket, pasted.to_string())))
    }

    /// Applies the extractor's outcome to title, description and thumbnail.
    pub fn finish_autofill(
        &mut self,
        ticket: OperationTicket,
        outcome: Result<PageMetadata, MetadataError>,
    ) -> Result<(), FormError> {
        if self.pending_metadata != Some(ticket) {
            return Err(FormError::Cancelled);
        }
        self.pending_metadata = None;

        let metadata = outcome?;
        self.fields.title = metadata.title;
        self.fields.description = metadata.description;
        self.fields.thumbnail_image = metadata.thumbnail_image;
        self.errors.remove(FormField::Title);
        self.errors.remove(FormField::Description);
        self.errors.remove(FormField::ThumbnailImage);
        self.show_preview = true;
        Ok(())
    }

    fn issue_ticket(&mut self) -> OperationTicket {
        self.next_ticket += 1;
        OperationTicket(self.next_ticket)
    }
}

impl Default for BookmarkForm {
    fn default() -> Self {
        Self::new(PLACEHOLDER_THUMBNAIL)
    }
}
