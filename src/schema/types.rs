//! Schema Types
//!
//! Typed structures for the canonical training-config sections. Unknown
//! hyperparameters are preserved in open maps rather than rejected: models
//! differ in their knobs, and the resolver must not constrain them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::resolver::ResolvedConfig;
use crate::types::{Result, TrainCfgError};

// =============================================================================
// Root Schema
// =============================================================================

/// Typed view of a resolved training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Task configuration (dataset name, target labels, metric)
    pub task: TaskConfig,

    /// Model name and hyperparameters
    pub model: ModelConfig,

    /// Optimizer and schedule settings
    pub optim: OptimConfig,

    /// Dataset splits keyed by name (train, val_id, ...)
    #[serde(default)]
    pub dataset: BTreeMap<String, DatasetSplit>,

    /// Experiment identifier appended to run directories
    #[serde(default)]
    pub identifier: Option<String>,

    /// Random number seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Logger backend name
    #[serde(default)]
    pub logger: Option<String>,

    /// Run with automatic mixed precision
    #[serde(default)]
    pub amp: bool,
}

impl TrainingConfig {
    /// Deserialize and validate a resolved configuration
    pub fn from_resolved(config: &ResolvedConfig) -> Result<Self> {
        let typed: Self = config
            .deserialize()
            .map_err(|e| TrainCfgError::schema("<root>", e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }

    /// Validate configuration values are within acceptable ranges.
    /// Returns `TrainCfgError::Schema` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.task.dataset.is_empty() {
            return Err(TrainCfgError::schema("task.dataset", "must not be empty"));
        }

        if self.model.name.is_empty() {
            return Err(TrainCfgError::schema("model.name", "must not be empty"));
        }

        if self.optim.max_epochs == 0 {
            return Err(TrainCfgError::schema(
                "optim.max_epochs",
                "must be greater than 0",
            ));
        }

        if self.optim.batch_size == 0 {
            return Err(TrainCfgError::schema(
                "optim.batch_size",
                "must be greater than 0",
            ));
        }

        if !(self.optim.lr_initial > 0.0 && self.optim.lr_initial.is_finite()) {
            return Err(TrainCfgError::schema(
                "optim.lr_initial",
                format!("must be a positive finite number, got {}", self.optim.lr_initial),
            ));
        }

        for (name, split) in &self.dataset {
            if split.src.is_empty() {
                return Err(TrainCfgError::schema(
                    format!("dataset.{name}.src"),
                    "must not be empty",
                ));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Task Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Dataset family the task trains on
    pub dataset: String,

    /// Human-readable task description
    #[serde(default)]
    pub description: Option<String>,

    /// Primary evaluation metric
    #[serde(default)]
    pub metric: Option<String>,

    /// Target labels predicted by the model
    #[serde(default)]
    pub labels: Vec<String>,
}

// =============================================================================
// Model Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Registered model name
    pub name: String,

    /// Remaining hyperparameters, passed through untouched
    #[serde(flatten)]
    pub params: BTreeMap<String, Value>,
}

// =============================================================================
// Optimizer Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimConfig {
    /// Training batch size
    pub batch_size: u32,

    /// Evaluation batch size (defaults to the training batch size)
    #[serde(default)]
    pub eval_batch_size: Option<u32>,

    /// Initial learning rate
    pub lr_initial: f64,

    /// Number of training epochs
    pub max_epochs: u32,

    /// Warmup steps before the schedule takes over
    #[serde(default)]
    pub warmup_steps: Option<u32>,

    /// Learning-rate scheduler name
    #[serde(default)]
    pub scheduler: Option<String>,

    /// Remaining optimizer knobs, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// =============================================================================
// Dataset Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    /// Path or URI of the split's data
    pub src: String,

    /// Normalize target labels for this split
    #[serde(default)]
    pub normalize_labels: bool,

    /// Remaining split options, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// =============================================================================
// Tests
// =============================================================================
