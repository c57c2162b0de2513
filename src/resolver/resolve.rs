//! Include Resolution
//!
//! Recursive resolution of a document's `includes` chain into a single
//! flattened tree. Documents earlier in `includes` merge first (lower
//! precedence); the including document's own keys always win, at every
//! nesting level. Cycle detection uses an explicit stack of in-progress
//! canonical paths, so no global state is involved and each call is
//! independent and reentrant.

use std::path::{Path, PathBuf};

use serde_yaml::Mapping;
use tracing::{debug, trace};

use super::document::{ConfigDocument, ResolvedConfig};
use super::merge::merge_trees;
use crate::types::{KeyPath, Result, TrainCfgError};

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving a document: the merged tree plus the override report
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The flattened configuration with no remaining `includes` key
    pub config: ResolvedConfig,
    /// Keys where a document overrode a value supplied by its includes
    pub shadowed: Vec<KeyPath>,
    /// Keys supplied by two sibling includes of the same document
    pub collisions: Vec<KeyPath>,
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a configuration document and its transitive includes
///
/// ```no_run
/// use traincfg::resolver::Resolver;
///
/// let resolution = Resolver::new().resolve("configs/is2re/faenet.yml")?;
/// println!("{}", resolution.config.to_yaml()?);
/// # Ok::<(), traincfg::TrainCfgError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    strict: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat sibling-include collisions as fatal instead of reporting them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve the document at `path` into a single flattened configuration
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Resolution> {
        let path = path.as_ref();
        let mut stack = Vec::new();
        let (tree, shadowed, collisions) = self.resolve_at(path, None, &mut stack)?;

        for key in &shadowed {
            debug!(key = %key, config = %path.display(), "include value overridden");
        }

        Ok(Resolution {
            config: ResolvedConfig::new(tree),
            shadowed,
            collisions,
        })
    }

    fn resolve_at(
        &self,
        path: &Path,
        included_from: Option<&Path>,
        stack: &mut Vec<PathBuf>,
    ) -> Result<(Mapping, Vec<KeyPath>, Vec<KeyPath>)> {
        let canonical = std::fs::canonicalize(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                match included_from {
                    Some(from) => TrainCfgError::not_found_in(path, from),
                    None => TrainCfgError::not_found(path),
                }
            } else {
                TrainCfgError::Io(e)
            }
        })?;

        if stack.contains(&canonical) {
            return Err(TrainCfgError::CyclicInclude {
                path: canonical,
                chain: stack.clone(),
            });
        }

        let doc = ConfigDocument::load(&canonical)?;
        trace!(config = %canonical.display(), includes = doc.includes().len(), "loaded");

        stack.push(canonical);
        let result = self.merge_chain(doc, stack);
        stack.pop();
        result
    }

    fn merge_chain(
        &self,
        doc: ConfigDocument,
        stack: &mut Vec<PathBuf>,
    ) -> Result<(Mapping, Vec<KeyPath>, Vec<KeyPath>)> {
        let mut base = Mapping::new();
        let mut shadowed = Vec::new();
        let mut collisions = Vec::new();

        for include in doc.includes() {
            let target = doc.dir().join(include);
            let (tree, inner_shadowed, inner_collisions) =
                self.resolve_at(&target, Some(doc.path()), stack)?;
            shadowed.extend(inner_shadowed);
            collisions.extend(inner_collisions);

            // Keys duplicated between sibling includes
            let (merged, duplicates) = merge_trees(base, tree);
            base = merged;
            collisions.extend(duplicates);
        }

        if self.strict && !collisions.is_empty() {
            return Err(TrainCfgError::SiblingCollision {
                path: doc.path().to_path_buf(),
                keys: collisions.iter().map(|k| k.as_str().to_string()).collect(),
            });
        }

        // The document's own keys merge last and win
        let (merged, overridden) = merge_trees(base, doc.into_tree());
        shadowed.extend(overridden);

        Ok((merged, shadowed, collisions))
    }
}

/// Resolve a document with default options
///
/// Convenience wrapper over [`Resolver::resolve`] returning only the
/// flattened configuration.
pub fn resolve(path: impl AsRef<Path>) -> Result<ResolvedConfig> {
    Ok(Resolver::new().resolve(path)?.config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_document_without_includes_resolves_to_itself() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "base.yml", "lr: 0.1\nlayers: 3\n");

        let resolution = Resolver::new().resolve(&path).unwrap();
        let expected: Mapping = serde_yaml::from_str("lr: 0.1\nlayers: 3\n").unwrap();

        assert_eq!(resolution.config.tree(), &expected);
        assert!(resolution.shadowed.is_empty());
        assert!(resolution.collisions.is_empty());
    }

    #[test]
    fn test_child_overrides_base() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "base.yml", "lr: 0.1\nlayers: 3\n");
        let child = write_config(&dir, "child.yml", "includes:\n  - base.yml\nlr: 0.2\n");

        let resolution = Resolver::new().resolve(&child).unwrap();

        assert_eq!(
            resolution.config.get("lr").and_then(Value::as_f64),
            Some(0.2)
        );
        assert_eq!(
            resolution.config.get("layers").and_then(Value::as_u64),
            Some(3)
        );
        assert_eq!(resolution.shadowed, vec![KeyPath::new("lr")]);
    }

    #[test]
    fn test_transitive_includes() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "c.yml", "depth: 6\ncutoff: 5.0\n");
        write_config(&dir, "b.yml", "includes:\n  - c.yml\ndepth: 4\n");
        let a = write_config(&dir, "a.yml", "includes:\n  - b.yml\nname: faenet\n");

        let config = resolve(&a).unwrap();

        // Keys unique to the deepest document survive
        assert_eq!(config.get("cutoff").and_then(Value::as_f64), Some(5.0));
        // The closest document wins on collision
        assert_eq!(config.get("depth").and_then(Value::as_u64), Some(4));
        assert_eq!(config.get("name").and_then(Value::as_str), Some("faenet"));
    }

    #[test]
    fn test_no_includes_key_in_output() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "base.yml", "includes: []\nlr: 0.1\n");
        let child = write_config(&dir, "child.yml", "includes:\n  - base.yml\n");

        let config = resolve(&child).unwrap();
        assert!(config.get("includes").is_none());
        assert_eq!(config.tree().len(), 1);
    }

    #[test]
    fn test_later_include_wins_over_earlier() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "first.yml", "batch_size: 32\nworkers: 2\n");
        write_config(&dir, "second.yml", "batch_size: 64\n");
        let top = write_config(
            &dir,
            "top.yml",
            "includes:\n  - first.yml\n  - second.yml\n",
        );

        let resolution = Resolver::new().resolve(&top).unwrap();

        assert_eq!(
            resolution.config.get("batch_size").and_then(Value::as_u64),
            Some(64)
        );
        assert_eq!(
            resolution.config.get("workers").and_then(Value::as_u64),
            Some(2)
        );
        assert_eq!(resolution.collisions, vec![KeyPath::new("batch_size")]);
    }

    #[test]
    fn test_independent_include_order_is_irrelevant() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "model.yml", "model:\n  name: faenet\n");
        write_config(&dir, "optim.yml", "optim:\n  max_epochs: 20\n");
        let ab = write_config(
            &dir,
            "ab.yml",
            "includes:\n  - model.yml\n  - optim.yml\n",
        );
        let ba = write_config(
            &dir,
            "ba.yml",
            "includes:\n  - optim.yml\n  - model.yml\n",
        );

        let left = resolve(&ab).unwrap();
        let right = resolve(&ba).unwrap();

        assert_eq!(
            left.get("model.name").and_then(Value::as_str),
            right.get("model.name").and_then(Value::as_str)
        );
        assert_eq!(
            left.get("optim.max_epochs").and_then(Value::as_u64),
            right.get("optim.max_epochs").and_then(Value::as_u64)
        );
        assert_eq!(left.fingerprint().unwrap(), right.fingerprint().unwrap());
    }

    #[test]
    fn test_nested_merge_across_documents() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "base.yml",
            "optim:\n  lr_initial: 0.001\n  max_epochs: 20\n  scheduler: cosine\n",
        );
        let child = write_config(
            &dir,
            "child.yml",
            "includes:\n  - base.yml\noptim:\n  max_epochs: 12\n",
        );

        let resolution = Resolver::new().resolve(&child).unwrap();

        assert_eq!(
            resolution
                .config
                .get("optim.lr_initial")
                .and_then(Value::as_f64),
            Some(0.001)
        );
        assert_eq!(
            resolution
                .config
                .get("optim.max_epochs")
                .and_then(Value::as_u64),
            Some(12)
        );
        assert_eq!(resolution.shadowed, vec![KeyPath::new("optim.max_epochs")]);
    }

    #[test]
    fn test_includes_resolve_relative_to_document_dir() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "shared/defaults.yml", "seed: 0\n");
        write_config(
            &dir,
            "shared/optim.yml",
            "includes:\n  - defaults.yml\noptim:\n  max_epochs: 20\n",
        );
        let top = write_config(
            &dir,
            "experiments/run.yml",
            "includes:\n  - ../shared/optim.yml\nidentifier: run-1\n",
        );

        let config = resolve(&top).unwrap();

        assert_eq!(config.get("seed").and_then(Value::as_u64), Some(0));
        assert_eq!(config.get("optim.max_epochs").and_then(Value::as_u64), Some(20));
    }

    #[test]
    fn test_self_include_is_cyclic() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "loop.yml", "includes:\n  - loop.yml\n");

        let err = Resolver::new().resolve(&path).unwrap_err();
        assert!(matches!(err, TrainCfgError::CyclicInclude { .. }));
    }

    #[test]
    fn test_transitive_cycle_detected() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "a.yml", "includes:\n  - b.yml\n");
        write_config(&dir, "b.yml", "includes:\n  - c.yml\n");
        write_config(&dir, "c.yml", "includes:\n  - a.yml\n");

        let err = Resolver::new().resolve(dir.path().join("a.yml")).unwrap_err();
        match err {
            TrainCfgError::CyclicInclude { chain, .. } => assert_eq!(chain.len(), 3),
            other => panic!("expected CyclicInclude, got {other}"),
        }
    }

    #[test]
    fn test_diamond_include_is_not_a_cycle() {
        // Both includes share a base; revisiting it off-stack is fine
        let dir = TempDir::new().unwrap();
        write_config(&dir, "common.yml", "seed: 0\n");
        write_config(&dir, "left.yml", "includes:\n  - common.yml\nleft: 1\n");
        write_config(&dir, "right.yml", "includes:\n  - common.yml\nright: 2\n");
        let top = write_config(
            &dir,
            "top.yml",
            "includes:\n  - left.yml\n  - right.yml\n",
        );

        let resolution = Resolver::new().resolve(&top).unwrap();

        assert_eq!(resolution.config.get("left").and_then(Value::as_u64), Some(1));
        assert_eq!(resolution.config.get("right").and_then(Value::as_u64), Some(2));
        // The shared key arrives from both branches and is recorded
        assert_eq!(resolution.collisions, vec![KeyPath::new("seed")]);
    }

    #[test]
    fn test_missing_include_reports_includer() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "child.yml", "includes:\n  - missing.yml\n");

        let err = Resolver::new().resolve(&path).unwrap_err();
        match err {
            TrainCfgError::NotFound { included_from, .. } => {
                assert!(included_from.is_some());
            }
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[test]
    fn test_missing_root_document() {
        let dir = TempDir::new().unwrap();
        let err = Resolver::new()
            .resolve(dir.path().join("absent.yml"))
            .unwrap_err();
        assert!(matches!(
            err,
            TrainCfgError::NotFound {
                included_from: None,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_mode_rejects_sibling_collisions() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "first.yml", "batch_size: 32\n");
        write_config(&dir, "second.yml", "batch_size: 64\n");
        let top = write_config(
            &dir,
            "top.yml",
            "includes:\n  - first.yml\n  - second.yml\n",
        );

        let err = Resolver::new().strict(true).resolve(&top).unwrap_err();
        match err {
            TrainCfgError::SiblingCollision { keys, .. } => {
                assert_eq!(keys, vec!["batch_size".to_string()]);
            }
            other => panic!("expected SiblingCollision, got {other}"),
        }
    }

    #[test]
    fn test_strict_mode_allows_plain_shadowing() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "base.yml", "lr: 0.1\n");
        let child = write_config(&dir, "child.yml", "includes:\n  - base.yml\nlr: 0.2\n");

        let resolution = Resolver::new().strict(true).resolve(&child).unwrap();
        assert_eq!(
            resolution.config.get("lr").and_then(Value::as_f64),
            Some(0.2)
        );
    }
}
