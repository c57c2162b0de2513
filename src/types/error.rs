//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (TrainCfgError) for the entire application
//! - Structured error variants with context for better debugging
//! - Resolution errors are fatal to the resolve call: no partial result,
//!   no retries
//! - No panic/unwrap - all errors are recoverable by the caller

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum TrainCfgError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    /// A document or include target does not exist
    #[error("config not found: {}{}", path.display(), included_from.as_ref().map(|p| format!(" (included from {})", p.display())).unwrap_or_default())]
    NotFound {
        path: PathBuf,
        included_from: Option<PathBuf>,
    },

    /// An include chain revisited a document already being resolved
    #[error("cyclic include: {} already on resolution stack [{}]", path.display(), format_chain(chain))]
    CyclicInclude {
        path: PathBuf,
        chain: Vec<PathBuf>,
    },

    /// A document exists but cannot be used as a configuration tree
    #[error("malformed config {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Two sibling includes supplied the same key (strict mode only)
    #[error("conflicting keys across includes of {}: {}", path.display(), keys.join(", "))]
    SiblingCollision { path: PathBuf, keys: Vec<String> },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("invalid override: {0}")]
    Override(String),

    #[error("schema violation at '{field}': {message}")]
    Schema { field: String, message: String },

    #[error("settings error: {0}")]
    Settings(String),
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub type Result<T> = std::result::Result<T, TrainCfgError>;

// =============================================================================
// Helper Constructors
// =============================================================================

impl TrainCfgError {
    /// Create a not-found error for a root document
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            path: path.into(),
            included_from: None,
        }
    }

    /// Create a not-found error for an include target
    pub fn not_found_in(path: impl Into<PathBuf>, included_from: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            path: path.into(),
            included_from: Some(included_from.into()),
        }
    }

    /// Create a malformed-document error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema-violation error
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
