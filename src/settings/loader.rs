//! Settings Loader (Figment-based)
//!
//! Loads and merges tool settings from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global settings (~/.config/traincfg/settings.toml)
//! 3. Project settings (.traincfg/settings.toml)
//! 4. Environment variables (TRAINCFG_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::types::Settings;
use crate::types::{Result, TrainCfgError};

/// Settings loader
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with the full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Settings> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        // Merge global settings
        if let Some(global_path) = Self::global_settings_path()
            && global_path.exists()
        {
            debug!("Loading global settings from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project settings
        let project_path = Self::project_settings_path();
        if project_path.exists() {
            debug!("Loading project settings from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g. TRAINCFG_OUTPUT_FORMAT -> output.format)
        figment = figment.merge(Env::prefixed("TRAINCFG_").split('_').lowercase(true));

        let settings: Settings = figment
            .extract()
            .map_err(|e| TrainCfgError::Settings(format!("settings error: {}", e)))?;

        settings.validate()?;

        Ok(settings)
    }

    /// Load settings from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Settings> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| TrainCfgError::Settings(format!("settings error: {}", e)))
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global settings directory (~/.config/traincfg/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("traincfg"))
    }

    /// Get path to global settings file
    pub fn global_settings_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Get path to project settings file
    pub fn project_settings_path() -> PathBuf {
        PathBuf::from(".traincfg/settings.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".traincfg")
    }

    // =========================================================================
    // Settings Commands
    // =========================================================================

    /// Show settings file paths
    pub fn show_path() {
        println!("Settings paths:");
        println!();

        // Global settings
        if let Some(global) = Self::global_settings_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        // Project settings
        let project = Self::project_settings_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective settings
    pub fn show_settings(as_json: bool) -> Result<()> {
        let settings = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&settings)
                    .map_err(|e| TrainCfgError::Settings(e.to_string()))?
            );
        }

        Ok(())
    }

    /// Edit settings file with default editor
    pub fn edit_settings(global: bool) -> Result<()> {
        let path = if global {
            Self::global_settings_path().ok_or_else(|| {
                TrainCfgError::Settings("cannot determine global settings path".to_string())
            })?
        } else {
            Self::project_settings_path()
        };

        if !path.exists() {
            println!("Settings file does not exist: {}", path.display());
            println!(
                "Run: traincfg settings init {}",
                if global { "--global" } else { "" }
            );
            return Ok(());
        }

        let editor = env::var("EDITOR").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        });

        let status = Command::new(&editor).arg(&path).status().map_err(|e| {
            TrainCfgError::Settings(format!("failed to launch editor {}: {}", editor, e))
        })?;

        if !status.success() {
            return Err(TrainCfgError::Settings("editor exited with error".to_string()));
        }

        println!("Settings saved: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global settings
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            TrainCfgError::Settings("cannot determine global settings directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let settings_path = global_dir.join("settings.toml");
        if !settings_path.exists() || force {
            fs::write(&settings_path, Self::default_global_settings())?;
            info!("Created global settings: {}", settings_path.display());
        } else {
            info!("Global settings exist: {}", settings_path.display());
        }

        Ok(global_dir)
    }

    /// Initialize project settings
    pub fn init_project() -> Result<PathBuf> {
        let project_dir = Self::project_dir();

        fs::create_dir_all(&project_dir)?;

        let settings_path = project_dir.join("settings.toml");
        if !settings_path.exists() {
            fs::write(&settings_path, Self::default_project_settings())?;
            info!("Created project settings: {}", settings_path.display());
        }

        Ok(project_dir)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default global settings content (TOML)
    fn default_global_settings() -> String {
        r#"# traincfg Global Settings
# User-wide defaults. Project settings in .traincfg/settings.toml override these.

version = "1.0"

[resolver]
strict = false

[output]
format = "yaml"
"#
        .to_string()
    }

    /// Generate default project settings content (TOML)
    fn default_project_settings() -> String {
        r#"# traincfg Project Settings
# Project-specific settings that override global defaults.

version = "1.0"

[paths]
configs_root = "configs"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_settings() {
        let settings = SettingsLoader::load().unwrap();
        assert_eq!(settings.version, "1.0");
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("TRAINCFG_RESOLVER_STRICT", "true");
        }
        let settings = SettingsLoader::load().unwrap();
        assert!(settings.resolver.strict);
        unsafe {
            std::env::remove_var("TRAINCFG_RESOLVER_STRICT");
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let settings = SettingsLoader::load_from_file(&path).unwrap();
        assert_eq!(settings.output.format, super::super::types::OutputFormat::Json);
    }
}
