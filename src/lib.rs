//! traincfg - Hierarchical Training-Configuration Resolver
//!
//! Resolves the layered YAML configurations used by ML experiment
//! pipelines: a document names the documents it builds on via a reserved
//! `includes` key, and resolution deep-merges the chain into one flattened
//! tree with deterministic precedence.
//!
//! ## Core Features
//!
//! - **Include Resolution**: recursive, cycle-checked, deterministic merge
//!   order (the including document always wins)
//! - **Override Reporting**: shadowed keys and sibling-include collisions
//!   surfaced after every resolution
//! - **CLI Overrides**: dotted `key.path=value` assignments on top of the
//!   resolved tree
//! - **Schema Check**: typed validation of the canonical training sections
//! - **Run Planning**: identifier, timestamp id, seed, run directory, and a
//!   config fingerprint derived from a resolved tree
//!
//! ## Quick Start
//!
//! ```no_run
//! use traincfg::resolver::Resolver;
//!
//! let resolution = Resolver::new().resolve("configs/is2re/faenet.yml")?;
//! println!("{}", resolution.config.to_yaml()?);
//! # Ok::<(), traincfg::TrainCfgError>(())
//! ```
//!
//! ## Modules
//!
//! - [`resolver`]: document loading, include resolution, merging, overrides
//! - [`schema`]: typed training-config sections with validation
//! - [`run`]: run-plan derivation from resolved configs
//! - [`discover`]: config document discovery
//! - [`settings`]: the tool's own layered settings

pub mod cli;
pub mod constants;
pub mod discover;
pub mod resolver;
pub mod run;
pub mod schema;
pub mod settings;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Resolution
pub use resolver::{ConfigDocument, Resolution, ResolvedConfig, Resolver, resolve};

// Error Types
pub use types::error::{Result, TrainCfgError};

// Schema
pub use schema::TrainingConfig;

// Run Planning
pub use run::{RunOptions, RunPlan};

// Settings
pub use settings::{OutputFormat, Settings, SettingsLoader};
