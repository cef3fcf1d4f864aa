//! Unit tests for the add-bookmark form: validation messages and the
//! collapsed / expanded / editing / submitting lifecycle.

use rstest::rstest;

use inspirevault::managers::bookmark_form::*;
use inspirevault::managers::category_filter::CategoryFilter;
use inspirevault::types::bookmark::PageMetadata;
use inspirevault::types::errors::{FormError, MetadataError, SaveError};
use inspirevault::types::form::{FormField, FormFields, FormPhase};
use inspirevault::types::settings::PLACEHOLDER_THUMBNAIL;

fn fields(url: &str, title: &str, category: &str) -> FormFields {
    FormFields {
        url: url.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        ..FormFields::default()
    }
}

/// An expanded form with valid input in every required field.
fn filled_form() -> BookmarkForm {
    let mut form = BookmarkForm::default();
    form.expand();
    form.set_field(FormField::Url, "https://example.com/x").unwrap();
    form.set_field(FormField::Title, "X").unwrap();
    form.set_field(FormField::Category, "coding").unwrap();
    form
}

// ─── Validation ───

#[test]
fn test_valid_input_has_no_errors() {
    let errors = validate_fields(
        &fields("https://example.com/productivity", "My Tips", "selfhelp"),
        &CategoryFilter::default(),
    );
    assert!(errors.is_empty());
}

#[test]
fn test_empty_form_reports_required_fields() {
    let errors = validate_fields(&FormFields::default(), &CategoryFilter::default());
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(FormField::Url), Some(URL_REQUIRED));
    assert_eq!(errors.get(FormField::Title), Some(TITLE_REQUIRED));
    assert_eq!(errors.get(FormField::Category), Some(CATEGORY_REQUIRED));
    assert!(!errors.contains(FormField::Description));
}

#[rstest]
#[case("not a url", Some(URL_INVALID))]
#[case("", Some(URL_REQUIRED))]
#[case("https://example", Some(URL_INVALID))]
#[case("https://Example.com", Some(URL_INVALID))]
#[case("example.com", None)]
#[case("example.com/x", None)]
#[case("http://news.site.org/2024/05/story_one.html", None)]
fn test_url_messages(#[case] url: &str, #[case] expected: Option<&str>) {
    let errors = validate_fields(&fields(url, "T", "coding"), &CategoryFilter::default());
    assert_eq!(errors.get(FormField::Url), expected);
}

#[rstest]
#[case("", Some(CATEGORY_REQUIRED))]
#[case("cooking", Some(CATEGORY_INVALID))]
#[case("all", Some(CATEGORY_INVALID))]
#[case("finance", None)]
#[case("videos", None)]
fn test_category_messages(#[case] category: &str, #[case] expected: Option<&str>) {
    let errors = validate_fields(
        &fields("https://example.com", "T", category),
        &CategoryFilter::default(),
    );
    assert_eq!(errors.get(FormField::Category), expected);
}

#[test]
fn test_invalid_url_only_flags_url() {
    let errors = validate_fields(&fields("not a url", "T", "finance"), &CategoryFilter::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(FormField::Url), Some(URL_INVALID));
}

// ─── Lifecycle ───

#[test]
fn test_starts_collapsed_and_refuses_input() {
    let mut form = BookmarkForm::default();
    assert_eq!(form.phase(), FormPhase::Collapsed);
    assert_eq!(form.set_field(FormField::Title, "x"), Err(FormError::NotExpanded));
    assert_eq!(
        form.begin_submit(&CategoryFilter::default()).map(|_| ()),
        Err(FormError::NotExpanded)
    );
}

#[test]
fn test_editing_clears_only_that_fields_error() {
    let categories = CategoryFilter::default();
    let mut form = BookmarkForm::default();
    form.expand();

    let err = form.begin_submit(&categories).unwrap_err();
    assert!(matches!(err, FormError::Validation(ref e) if e.len() == 3));
    assert_eq!(form.errors().len(), 3);
    assert_eq!(form.phase(), FormPhase::Editing);

    form.set_field(FormField::Title, "Hello").unwrap();
    assert!(!form.errors().contains(FormField::Title));
    assert!(form.errors().contains(FormField::Url));
    assert!(form.errors().contains(FormField::Category));
}

#[test]
fn test_submit_locks_and_defaults_thumbnail() {
    let categories = CategoryFilter::default();
    let mut form = filled_form();

    let (_, draft) = form.begin_submit(&categories).unwrap();

    assert_eq!(draft.thumbnail_image, PLACEHOLDER_THUMBNAIL);
    assert_eq!(draft.description, "");
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert!(form.is_busy());
    assert_eq!(form.set_field(FormField::Title, "Y"), Err(FormError::Locked));
    assert_eq!(form.begin_submit(&categories).map(|_| ()), Err(FormError::Busy));
}

#[test]
fn test_custom_placeholder_is_used() {
    let mut form = BookmarkForm::new("https://cdn.example.com/blank.png");
    form.expand();
    form.set_field(FormField::Url, "example.com").unwrap();
    form.set_field(FormField::Title, "X").unwrap();
    form.set_field(FormField::Category, "design").unwrap();

    let (_, draft) = form.begin_submit(&CategoryFilter::default()).unwrap();
    assert_eq!(draft.thumbnail_image, "https://cdn.example.com/blank.png");
}

#[test]
fn test_successful_save_resets_and_collapses() {
    let mut form = filled_form();
    let (ticket, draft) = form.begin_submit(&CategoryFilter::default()).unwrap();

    let saved = form.finish_submit(ticket, Ok(())).unwrap();

    assert_eq!(saved, draft);
    assert_eq!(form.phase(), FormPhase::Collapsed);
    assert_eq!(*form.fields(), FormFields::default());
    assert!(form.errors().is_empty());
    assert!(!form.is_busy());
}

#[test]
fn test_failed_save_keeps_input() {
    let mut form = filled_form();
    let (ticket, _) = form.begin_submit(&CategoryFilter::default()).unwrap();
    let failure = SaveError::Network("offline".to_string());

    assert_eq!(
        form.finish_submit(ticket, Err(failure.clone())),
        Err(FormError::Save(failure))
    );
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.fields().title, "X");
    assert!(!form.is_busy());
}

#[test]
fn test_hide_keeps_input_and_toggle_restores() {
    let mut form = filled_form();
    form.toggle();
    assert_eq!(form.phase(), FormPhase::Collapsed);
    assert_eq!(form.fields().title, "X");

    form.toggle();
    assert_eq!(form.phase(), FormPhase::Expanded);
    assert_eq!(form.fields().url, "https://example.com/x");
}

#[test]
fn test_hide_is_ignored_while_submitting() {
    let mut form = filled_form();
    form.begin_submit(&CategoryFilter::default()).unwrap();
    form.hide();
    assert_eq!(form.phase(), FormPhase::Submitting);
}

#[test]
fn test_cancel_discards_everything() {
    let mut form = filled_form();
    let (ticket, _) = form.begin_submit(&CategoryFilter::default()).unwrap();

    form.cancel();

    assert_eq!(form.phase(), FormPhase::Collapsed);
    assert_eq!(*form.fields(), FormFields::default());
    assert!(!form.is_busy());
    assert_eq!(form.finish_submit(ticket, Ok(())), Err(FormError::Cancelled));
}

// ─── Auto-fill ───

fn metadata() -> PageMetadata {
    PageMetadata {
        title: "Example Article Title".to_string(),
        description: "Desc".to_string(),
        thumbnail_image: "https://example.com/t.jpg".to_string(),
    }
}

#[test]
fn test_autofill_fills_fields_and_shows_preview() {
    let mut form = BookmarkForm::default();
    form.expand();

    let (ticket, url) = form.begin_autofill("https://example.com/article").unwrap().unwrap();
    assert_eq!(url, "https://example.com/article");
    assert_eq!(form.fields().url, url);
    assert!(form.is_fetching_metadata());
    assert!(form.preview().is_none());

    form.finish_autofill(ticket, Ok(metadata())).unwrap();

    assert!(!form.is_fetching_metadata());
    assert_eq!(form.fields().title, "Example Article Title");
    assert_eq!(form.fields().thumbnail_image, "https://example.com/t.jpg");
    assert_eq!(form.preview().map(|p| p.title.as_str()), Some("Example Article Title"));
    assert_eq!(form.view().preview, Some(form.fields().clone()));
}

#[test]
fn test_autofill_ignores_non_url_text() {
    let mut form = BookmarkForm::default();
    form.expand();
    assert_eq!(form.begin_autofill("hello world"), Ok(None));
    assert_eq!(form.begin_autofill("   "), Ok(None));
    assert_eq!(form.begin_autofill("  https://example.com/article\n"), Ok(None));
    assert_eq!(form.phase(), FormPhase::Expanded);
    assert_eq!(*form.fields(), FormFields::default());
}

#[test]
fn test_autofill_refuses_overlap_and_reports_failures() {
    let mut form = BookmarkForm::default();
    form.expand();
    let (ticket, _) = form.begin_autofill("example.com").unwrap().unwrap();
    assert_eq!(form.begin_autofill("example.org"), Err(FormError::Busy));

    let failure = MetadataError::Network("timeout".to_string());
    assert_eq!(
        form.finish_autofill(ticket, Err(failure.clone())),
        Err(FormError::Metadata(failure))
    );
    assert!(!form.is_fetching_metadata());
    assert_eq!(form.fields().url, "example.com");
    assert!(form.fields().title.is_empty());
}

#[test]
fn test_autofill_result_after_cancel_is_dropped() {
    let mut form = BookmarkForm::default();
    form.expand();
    let (ticket, _) = form.begin_autofill("example.com").unwrap().unwrap();
    form.cancel();

    assert_eq!(form.finish_autofill(ticket, Ok(metadata())), Err(FormError::Cancelled));
    assert!(form.fields().title.is_empty());
}
