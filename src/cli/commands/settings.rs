//! Settings Command
//!
//! Manage traincfg tool settings.
//!
//! Usage:
//!   traincfg settings show [-f json]
//!   traincfg settings path
//!   traincfg settings edit [-g]
//!   traincfg settings init [-g] [--force]

use crate::settings::SettingsLoader;
use crate::types::Result;

/// Show settings
pub fn show(global: bool, format: &str) -> Result<()> {
    let as_json = format == "json";

    if global {
        if let Some(global_path) = SettingsLoader::global_settings_path() {
            if global_path.exists() {
                let content = std::fs::read_to_string(&global_path)?;
                println!("# Global Settings: {}\n", global_path.display());
                println!("{}", content);
            } else {
                println!("No global settings found.");
                println!("Run 'traincfg settings init --global' to create them.");
            }
        } else {
            println!("Cannot determine global settings directory.");
        }
    } else {
        // Show merged effective settings
        SettingsLoader::show_settings(as_json)?;
    }
    Ok(())
}

/// Show settings file paths
pub fn path() -> Result<()> {
    SettingsLoader::show_path();
    Ok(())
}

/// Edit settings file
pub fn edit(global: bool) -> Result<()> {
    SettingsLoader::edit_settings(global)
}

/// Initialize global settings
pub fn init_global(force: bool) -> Result<()> {
    let dir = SettingsLoader::init_global(force)?;
    println!("✓ Initialized global settings");
    println!("  Directory: {}", dir.display());
    if let Some(settings_path) = SettingsLoader::global_settings_path() {
        println!("  Settings:  {}", settings_path.display());
    }
    Ok(())
}

/// Initialize project settings
pub fn init_project() -> Result<()> {
    let dir = SettingsLoader::init_project()?;
    println!("✓ Initialized project settings");
    println!("  Directory: {}", dir.display());
    println!(
        "  Settings:  {}",
        SettingsLoader::project_settings_path().display()
    );
    Ok(())
}
