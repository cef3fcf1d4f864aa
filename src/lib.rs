//! InspireVault: a bookmark vault core.
//!
//! Categorized bookmark cards, a validating add-bookmark form with clipboard
//! auto-fill, and likes. This library crate exposes all modules for use by
//! the binaries and integration tests.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
