//! Configuration loading and hot-reloading for discotui.
//!
//! Uses figment for YAML-based configuration with sensible defaults and
//! `DISCOTUI_` environment overrides, and notify + arc-swap for live file
//! watching so the card grid can be reshaped while the TUI is running.

pub mod paths;
pub mod schema;
pub mod watcher;

pub use schema::{ApiConfig, AuthConfig, Config, GridConfig, LogConfig};
pub use watcher::ConfigWatcher;
