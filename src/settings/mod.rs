//! Tool Settings
//!
//! The tool's own layered settings, distinct from the training configs it
//! resolves:
//! 1. Built-in defaults
//! 2. Global settings (~/.config/traincfg/settings.toml)
//! 3. Project settings (.traincfg/settings.toml)
//! 4. Environment variables (TRAINCFG_*)

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::*;
