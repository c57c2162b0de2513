//! Training-Config Schema
//!
//! Typed view of the canonical training-configuration sections with range
//! validation. Resolution itself is schema-agnostic; this layer is for
//! callers that want the merged tree checked before handing it to a
//! training pipeline.

mod types;

pub use types::{
    DatasetSplit, ModelConfig, OptimConfig, TaskConfig, TrainingConfig,
};
