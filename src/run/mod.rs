//! Run Planning
//!
//! Derives run metadata from a resolved configuration: identifier,
//! timestamped run id, seed, run directory, and the configuration
//! fingerprint that ties run output back to the exact config that
//! produced it.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use serde_yaml::Value;

use crate::constants::run::{
    DEFAULT_IDENTIFIER, DEFAULT_RUN_DIR, SHORT_FINGERPRINT_LEN, TIMESTAMP_FORMAT,
};
use crate::resolver::ResolvedConfig;
use crate::types::Result;

// =============================================================================
// Run Options
// =============================================================================

/// Command-line options layered over config-supplied run metadata
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Experiment identifier (overrides the config's `identifier` key)
    pub identifier: Option<String>,
    /// Random seed (overrides the config's `seed` key)
    pub seed: Option<u64>,
    /// Base directory for run output (overrides the config's `run_dir` key)
    pub run_dir: Option<PathBuf>,
}

// =============================================================================
// Run Plan
// =============================================================================

/// Everything a training pipeline needs to start a run
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    /// Experiment identifier
    pub identifier: String,
    /// Timestamped run id (`2026-08-07-14-31-05-faenet-is2re`)
    pub timestamp_id: String,
    /// Random seed
    pub seed: u64,
    /// Directory where this run writes checkpoints and logs
    pub run_dir: PathBuf,
    /// Full SHA-256 fingerprint of the resolved configuration
    pub fingerprint: String,
}

impl RunPlan {
    /// Build a run plan from a resolved configuration
    ///
    /// Precedence for each field: CLI option, then config key, then default.
    pub fn build(config: &ResolvedConfig, options: &RunOptions) -> Result<Self> {
        let identifier = options
            .identifier
            .clone()
            .or_else(|| config_string(config, "identifier"))
            .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string());

        let seed = options
            .seed
            .or_else(|| config.get("seed").and_then(Value::as_u64))
            .unwrap_or(0);

        let base_dir = options
            .run_dir
            .clone()
            .or_else(|| config_string(config, "run_dir").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RUN_DIR));

        let timestamp_id = format!(
            "{}-{}",
            Utc::now().format(TIMESTAMP_FORMAT),
            identifier
        );

        Ok(Self {
            run_dir: base_dir.join(&timestamp_id),
            identifier,
            timestamp_id,
            seed,
            fingerprint: config.fingerprint()?,
        })
    }

    /// Shortened fingerprint for summaries
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..SHORT_FINGERPRINT_LEN.min(self.fingerprint.len())]
    }
}

fn config_string(config: &ResolvedConfig, key: &str) -> Option<String> {
    config.get(key).and_then(Value::as_str).map(str::to_string)
}

// =============================================================================
// Tests
// =============================================================================
