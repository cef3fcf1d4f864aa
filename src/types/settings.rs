use serde::{Deserialize, Serialize};

/// Thumbnail used when a bookmark is saved without one.
pub const PLACEHOLDER_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?q=80&w=2128&auto=format&fit=crop";

/// Top-level vault settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VaultSettings {
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub metadata: MetadataSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub library: LibrarySettings,
}

/// Add-bookmark form behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormSettings {
    /// Simulated save latency in milliseconds.
    pub save_delay_ms: u64,
    /// Simulated metadata fetch latency in milliseconds.
    pub metadata_delay_ms: u64,
    pub placeholder_thumbnail: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            save_delay_ms: 1500,
            metadata_delay_ms: 2000,
            placeholder_thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
        }
    }
}

/// Which metadata extractor the app wires in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MetadataProvider {
    Mock,
    Http,
}

/// Metadata extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadataSettings {
    pub provider: MetadataProvider,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            provider: MetadataProvider::Mock,
            request_timeout_secs: 10,
            user_agent: format!("InspireVault/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Startup content of the vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibrarySettings {
    pub seed_on_startup: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            seed_on_startup: true,
        }
    }
}
