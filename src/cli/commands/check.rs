//! Check Command
//!
//! Resolve a configuration document and validate it against the
//! training-config schema.
//!
//! Usage:
//!   traincfg check configs/is2re/faenet.yml

use std::path::Path;

use crate::cli::Output;
use crate::resolver::Resolver;
use crate::schema::TrainingConfig;
use crate::types::Result;

pub fn run(path: &Path, strict: bool) -> Result<()> {
    let out = Output::new();
    let resolution = Resolver::new().strict(strict).resolve(path)?;

    for key in &resolution.collisions {
        out.warning(&format!("key '{}' supplied by more than one include", key));
    }
    for key in &resolution.shadowed {
        out.info(&format!("key '{}' overrides an included value", key));
    }

    let config = TrainingConfig::from_resolved(&resolution.config)?;

    out.success(&format!("{} resolves cleanly", path.display()));
    println!("  task:    {}", config.task.dataset);
    println!("  model:   {}", config.model.name);
    println!(
        "  optim:   batch_size={} lr_initial={} max_epochs={}",
        config.optim.batch_size, config.optim.lr_initial, config.optim.max_epochs
    );
    if !config.dataset.is_empty() {
        let splits: Vec<&str> = config.dataset.keys().map(String::as_str).collect();
        println!("  splits:  {}", splits.join(", "));
    }

    Ok(())
}
