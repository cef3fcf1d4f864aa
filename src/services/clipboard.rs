//! Clipboard access for InspireVault.
//!
//! The clipboard belongs to the presentation layer; the core only needs a way
//! to ask for its text.

use async_trait::async_trait;

use crate::types::errors::ClipboardError;

/// Trait defining the clipboard read collaborator.
#[async_trait]
pub trait ClipboardReader: Send + Sync {
    async fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Clipboard contents handed over by the caller.
///
/// An unavailable clipboard keeps the caller's reason for the error message.
#[derive(Debug, Clone)]
pub struct ProvidedClipboard {
    text: Result<String, String>,
}

impl ProvidedClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: Ok(text.into()) }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            text: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ClipboardReader for ProvidedClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        match &self.text {
            Ok(text) if text.is_empty() => Err(ClipboardError::Empty),
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(ClipboardError::Unavailable(reason.clone())),
        }
    }
}
