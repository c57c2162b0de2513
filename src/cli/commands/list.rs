//! List Command
//!
//! Discover configuration documents under a root and report whether each
//! one resolves.
//!
//! Usage:
//!   traincfg list
//!   traincfg list configs/is2re

use std::path::Path;

use crate::cli::Output;
use crate::discover::ConfigScanner;
use crate::resolver::Resolver;
use crate::types::Result;

pub fn run(root: &Path) -> Result<()> {
    let out = Output::new();

    if !root.exists() {
        out.warning(&format!("configs root does not exist: {}", root.display()));
        return Ok(());
    }

    let documents = ConfigScanner::new(root).scan();
    if documents.is_empty() {
        out.info(&format!("no configuration documents under {}", root.display()));
        return Ok(());
    }

    let resolver = Resolver::new();
    let mut failures = 0usize;
    for path in &documents {
        match resolver.resolve(path) {
            Ok(resolution) => {
                let keys = resolution.config.tree().len();
                out.success(&format!("{} ({} top-level keys)", path.display(), keys));
            }
            Err(e) => {
                failures += 1;
                out.error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    println!();
    println!("{} documents, {} unresolvable", documents.len(), failures);
    Ok(())
}
