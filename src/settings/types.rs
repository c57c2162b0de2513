//! Settings Types
//!
//! Tool settings structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Settings format version
    pub version: String,

    /// Resolution behavior
    pub resolver: ResolverSettings,

    /// Output rendering
    pub output: OutputSettings,

    /// Filesystem locations
    pub paths: PathsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            resolver: ResolverSettings::default(),
            output: OutputSettings::default(),
            paths: PathsSettings::default(),
        }
    }
}

impl Settings {
    /// Validate settings values after extraction.
    /// Returns `TrainCfgError::Settings` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.version != "1.0" {
            return Err(crate::types::TrainCfgError::Settings(format!(
                "unsupported settings version '{}'",
                self.version
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Resolver Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Fail on keys duplicated between sibling includes
    pub strict: bool,
}

// =============================================================================
// Output Settings
// =============================================================================

/// Rendering format for resolved configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}. Valid values: yaml, json", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default rendering format
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Yaml,
        }
    }
}

// =============================================================================
// Paths Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSettings {
    /// Root directory scanned by `traincfg list`
    pub configs_root: PathBuf,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            configs_root: PathBuf::from("configs"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
