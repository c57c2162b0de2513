//! Resolve Command
//!
//! Resolve a configuration document and print the flattened tree.
//!
//! Usage:
//!   traincfg resolve configs/is2re/faenet.yml
//!   traincfg resolve configs/is2re/faenet.yml -f json
//!   traincfg resolve configs/is2re/faenet.yml --set optim.max_epochs=12

use std::path::Path;

use tracing::debug;

use crate::cli::Output;
use crate::resolver::{Resolver, apply_overrides};
use crate::settings::OutputFormat;
use crate::types::Result;

pub struct ResolveOptions<'a> {
    pub path: &'a Path,
    pub overrides: &'a [String],
    pub format: OutputFormat,
    pub strict: bool,
}

pub fn run(options: ResolveOptions<'_>) -> Result<()> {
    let out = Output::new();
    let resolution = Resolver::new().strict(options.strict).resolve(options.path)?;

    for key in &resolution.collisions {
        out.warning(&format!("key '{}' supplied by more than one include", key));
    }

    let mut tree = resolution.config.into_tree();
    let applied = apply_overrides(&mut tree, options.overrides)?;
    for key in &applied {
        debug!(key = %key, "override applied");
    }

    let config = crate::resolver::ResolvedConfig::new(tree);
    match options.format {
        OutputFormat::Yaml => print!("{}", config.to_yaml()?),
        OutputFormat::Json => println!("{}", config.to_json_pretty()?),
    }

    Ok(())
}
