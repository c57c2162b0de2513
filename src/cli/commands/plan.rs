//! Plan Command
//!
//! Resolve a configuration document and print the run plan that would be
//! derived from it, without starting anything.
//!
//! Usage:
//!   traincfg plan configs/is2re/faenet.yml
//!   traincfg plan configs/is2re/faenet.yml --identifier faenet-is2re --seed 42

use std::path::Path;

use crate::cli::Output;
use crate::resolver::{Resolver, apply_overrides};
use crate::run::{RunOptions, RunPlan};
use crate::types::Result;

pub struct PlanOptions<'a> {
    pub path: &'a Path,
    pub overrides: &'a [String],
    pub run: RunOptions,
    pub strict: bool,
}

pub fn run(options: PlanOptions<'_>) -> Result<()> {
    let out = Output::new();
    let resolution = Resolver::new().strict(options.strict).resolve(options.path)?;

    let mut tree = resolution.config.into_tree();
    apply_overrides(&mut tree, options.overrides)?;
    let config = crate::resolver::ResolvedConfig::new(tree);

    let plan = RunPlan::build(&config, &options.run)?;

    out.section("Run plan");
    println!("  config:       {}", options.path.display());
    println!("  identifier:   {}", plan.identifier);
    println!("  timestamp_id: {}", plan.timestamp_id);
    println!("  seed:         {}", plan.seed);
    println!("  run_dir:      {}", plan.run_dir.display());
    println!("  fingerprint:  {}", plan.short_fingerprint());

    Ok(())
}
