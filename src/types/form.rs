use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A field of the add-bookmark form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Url,
    Title,
    Description,
    Category,
    ThumbnailImage,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Url,
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::ThumbnailImage,
    ];

    /// Wire name of the field, as used in error maps and RPC params.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Url => "url",
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::ThumbnailImage => "thumbnailImage",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown form field: {}", s))
    }
}

/// Raw user input held by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail_image: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Url => &self.url,
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::ThumbnailImage => &self.thumbnail_image,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Url => self.url = value,
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::ThumbnailImage => self.thumbnail_image = value,
        }
    }
}

/// Per-field validation messages. An empty map means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<FormField, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Lifecycle phase of the add-bookmark form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Collapsed,
    Expanded,
    Editing,
    Submitting,
}

/// Serializable snapshot of the form, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub phase: FormPhase,
    pub fetching_metadata: bool,
    pub busy: bool,
    pub fields: FormFields,
    pub errors: ErrorMap,
    pub preview: Option<FormFields>,
}
