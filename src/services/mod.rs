// InspireVault services
// Services are the collaborators around the core: saving, metadata extraction, clipboard access, settings.

pub mod bookmark_saver;
pub mod clipboard;
pub mod metadata_extractor;
pub mod settings_engine;
