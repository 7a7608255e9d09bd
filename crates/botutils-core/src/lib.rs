//! Core domain + pipeline logic for the owner-utilities bot plugin.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! `MessagingPort` trait implemented in the adapter crate; the log-forwarding
//! pipeline only sees `LogEvent`s dispatched through the sink registry.

pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod plugin;
pub mod settings;
pub mod typing;

pub use errors::{Error, Result};

/// Plugin display name, used in settings and log-forward footers.
pub const PLUGIN_DISPLAY_NAME: &str = "Bot Utils";

/// Plugin version surfaced to users.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
