//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Resolver constants
pub mod resolver {
    /// Reserved key naming the documents merged beneath the current one
    pub const INCLUDES_KEY: &str = "includes";
}

/// Run planning constants
pub mod run {
    /// UTC timestamp format for run identifiers
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

    /// Default base directory for run output
    pub const DEFAULT_RUN_DIR: &str = "runs";

    /// Identifier used when neither the CLI nor the config names the run
    pub const DEFAULT_IDENTIFIER: &str = "untitled";

    /// Hex characters of the fingerprint shown in summaries
    pub const SHORT_FINGERPRINT_LEN: usize = 12;
}

/// Config discovery constants
pub mod discover {
    /// File extensions recognized as configuration documents
    pub const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml"];

    /// Default directories to skip when scanning
    pub const DEFAULT_SKIP_DIRS: &[&str] = &[
        ".git",
        "node_modules",
        "target",
        "build",
        "dist",
        "__pycache__",
        ".venv",
    ];
}
