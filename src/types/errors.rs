use std::fmt;

use super::form::ErrorMap;

// === BookmarkError ===

/// Errors related to bookmark store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(u64),
    /// The bookmark references a category that is unknown or not assignable.
    UnknownCategory(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::UnknownCategory(id) => write!(f, "Unknown bookmark category: {}", id),
        }
    }
}

impl std::error::Error for BookmarkError {}

// === CategoryError ===

/// Errors related to category selection.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryError {
    /// Category with the given ID was not found.
    NotFound(String),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::NotFound(id) => write!(f, "Category not found: {}", id),
        }
    }
}

impl std::error::Error for CategoryError {}

// === ClipboardError ===

/// Errors raised while reading the clipboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardError {
    /// The clipboard could not be read (permission denied, no access, ...).
    Unavailable(String),
    /// The clipboard holds no text.
    Empty,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => {
                write!(f, "Failed to read from clipboard: {}", msg)
            }
            ClipboardError::Empty => write!(f, "Clipboard is empty"),
        }
    }
}

impl std::error::Error for ClipboardError {}

// === SaveError ===

/// Errors returned by a bookmark saver.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveError {
    /// The backend refused the bookmark.
    Rejected(String),
    /// The backend could not be reached.
    Network(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Rejected(msg) => write!(f, "Bookmark save rejected: {}", msg),
            SaveError::Network(msg) => write!(f, "Bookmark save network error: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {}

// === MetadataError ===

/// Errors returned by a metadata extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// The page could not be fetched.
    Network(String),
    /// The page was fetched but carried no usable metadata.
    Parse(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::Network(msg) => write!(f, "Metadata network error: {}", msg),
            MetadataError::Parse(msg) => write!(f, "Metadata parse error: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {}

// === FormError ===

/// Errors related to the add-bookmark form.
///
/// None of these are fatal: after any of them the form is still usable.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// One or more fields failed validation. The per-field messages are kept
    /// in the map; the display string is the aggregate notification.
    Validation(ErrorMap),
    /// A save or metadata fetch is already in flight.
    Busy,
    /// Inputs are locked while a submission is pending.
    Locked,
    /// The form is collapsed.
    NotExpanded,
    /// The operation was cancelled by closing the form.
    Cancelled,
    /// The saver reported a failure.
    Save(SaveError),
    /// The metadata extractor reported a failure.
    Metadata(MetadataError),
    /// The clipboard could not be read.
    Clipboard(ClipboardError),
    /// The store refused the saved bookmark.
    Store(BookmarkError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(_) => write!(f, "Please fix the errors before submitting"),
            FormError::Busy => write!(f, "Form is busy"),
            FormError::Locked => write!(f, "Form inputs are locked while saving"),
            FormError::NotExpanded => write!(f, "Form is collapsed"),
            FormError::Cancelled => write!(f, "Form operation cancelled"),
            FormError::Save(e) => write!(f, "{}", e),
            FormError::Metadata(e) => write!(f, "{}", e),
            FormError::Clipboard(e) => write!(f, "{}", e),
            FormError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Save(e) => Some(e),
            FormError::Metadata(e) => Some(e),
            FormError::Clipboard(e) => Some(e),
            FormError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SaveError> for FormError {
    fn from(e: SaveError) -> Self {
        FormError::Save(e)
    }
}

impl From<MetadataError> for FormError {
    fn from(e: MetadataError) -> Self {
        FormError::Metadata(e)
    }
}

impl From<ClipboardError> for FormError {
    fn from(e: ClipboardError) -> Self {
        FormError::Clipboard(e)
    }
}

impl From<BookmarkError> for FormError {
    fn from(e: BookmarkError) -> Self {
        FormError::Store(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
