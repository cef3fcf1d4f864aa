//! Page metadata extraction for InspireVault.
//!
//! Fills title, description and thumbnail for a pasted URL. The mock
//! extractor returns fixed values after a delay; the HTTP extractor
//! (feature `network`) fetches the page and reads its head tags.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::bookmark::PageMetadata;
use crate::types::errors::MetadataError;

pub const MOCK_TITLE: &str = "Example Article Title";
pub const MOCK_DESCRIPTION: &str = "This is a sample description that would be extracted from the meta tags of the website you're bookmarking.";
pub const MOCK_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1507842217343-583bb7270b66?auto=format&fit=crop&w=1170&q=80";

/// Trait defining the metadata-extraction collaborator.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<PageMetadata, MetadataError>;
}

/// Extractor returning fixed metadata after a fixed delay.
pub struct MockMetadataExtractor {
    delay: Duration,
}

impl MockMetadataExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MetadataExtractor for MockMetadataExtractor {
    async fn extract(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        tracing::debug!(url, "returning mock metadata");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(PageMetadata {
            title: MOCK_TITLE.to_string(),
            description: MOCK_DESCRIPTION.to_string(),
            thumbnail_image: MOCK_THUMBNAIL.to_string(),
        })
    }
}

/// Extractor that fetches the page over HTTP.
#[cfg(feature = "network")]
pub struct HttpMetadataExtractor {
    client: reqwest::Client,
}

#[cfg(feature = "network")]
impl HttpMetadataExtractor {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| MetadataError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "network")]
#[async_trait]
impl MetadataExtractor for HttpMetadataExtractor {
    async fn extract(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        let target = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };

        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(MetadataError::Network(format!(
                "{} returned {}",
                target,
                response.status()
            )));
        }
        let html = response
            .text()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        parse_page_metadata(&html)
    }
}

/// Reads title, description and preview image from an HTML document.
///
/// Open Graph tags win over `<title>` and `<meta name="description">`.
pub fn parse_page_metadata(html: &str) -> Result<PageMetadata, MetadataError> {
    let metas = meta_tags(html);
    let meta = |key: &str| {
        metas
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.clone())
    };

    let title = meta("og:title")
        .or_else(|| extract_between_tags(html, "title"))
        .map(|t| decode_entities(t.trim()))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MetadataError::Parse("page has no title".to_string()))?;

    let description = meta("og:description")
        .or_else(|| meta("description"))
        .map(|d| decode_entities(d.trim()))
        .unwrap_or_default();

    let thumbnail_image = meta("og:image")
        .or_else(|| meta("twitter:image"))
        .map(|i| decode_entities(i.trim()))
        .unwrap_or_default();

    Ok(PageMetadata {
        title,
        description,
        thumbnail_image,
    })
}

/// Extracts content between a given tag pair.
fn extract_between_tags(html: &str, tag: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let start_idx = lower.find(&open)?;
    let tag_end = lower[start_idx..].find('>')?;
    let content_start = start_idx + tag_end + 1;
    let end_idx = lower[content_start..].find(&close)?;
    Some(html[content_start..content_start + end_idx].to_string())
}

/// Collects `(name|property, content)` pairs from every `<meta>` tag.
fn meta_tags(html: &str) -> Vec<(String, String)> {
    let lower = html.to_ascii_lowercase();
    let mut tags = Vec::new();
    let mut cursor = 0;
    while let Some(found) = lower[cursor..].find("<meta") {
        let start = cursor + found;
        let Some(len) = lower[start..].find('>') else {
            break;
        };
        let attrs = parse_attributes(&html[start + 5..start + len]);
        let key = attrs
            .iter()
            .find(|(k, _)| k == "property" || k == "name")
            .map(|(_, v)| v.clone());
        let content = attrs
            .iter()
            .find(|(k, _)| k == "content")
            .map(|(_, v)| v.clone());
        if let (Some(key), Some(content)) = (key, content) {
            tags.push((key, content));
        }
        cursor = start + len + 1;
    }
    tags
}

/// Parses `key="value"` / `key='value'` / `key=value` attributes.
/// Keys are lowercased.
fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() || c == '/' {
            continue;
        }
        let key_start = i;
        let mut key_end = raw.len();
        while let Some(&(j, c)) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                key_end = j;
                break;
            }
            chars.next();
        }
        let key = raw[key_start..key_end].to_ascii_lowercase();

        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        if !matches!(chars.peek(), Some((_, '='))) {
            continue;
        }
        chars.next();
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }

        let value = match chars.peek().copied() {
            Some((j, quote @ ('"' | '\''))) => {
                chars.next();
                let value_start = j + 1;
                let mut value_end = raw.len();
                for (k, c) in chars.by_ref() {
                    if c == quote {
                        value_end = k;
                        break;
                    }
                }
                raw[value_start..value_end].to_string()
            }
            Some((j, _)) => {
                let mut value_end = raw.len();
                while let Some(&(k, c)) = chars.peek() {
                    if c.is_whitespace() {
                        value_end = k;
                        break;
                    }
                    chars.next();
                }
                raw[j..value_end].trim_end_matches('/').to_string()
            }
            None => String::new(),
        };
        attrs.push((key, value));
    }
    attrs
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
