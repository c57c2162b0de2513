//! Deep Merge
//!
//! Pure deep-merge-with-override over two configuration trees. Nested
//! mappings merge key-by-key recursively; scalars and sequences are
//! overwritten wholesale, never appended. The overlay always wins.

use serde_yaml::{Mapping, Value};

use super::document::key_label;
use crate::types::KeyPath;

/// Merge `overlay` on top of `base`
///
/// Returns the merged tree together with the dotted paths of every leaf the
/// overlay replaced. Key order of `base` is preserved; keys new in the
/// overlay are appended in overlay order.
pub fn merge_trees(base: Mapping, overlay: Mapping) -> (Mapping, Vec<KeyPath>) {
    let mut replaced = Vec::new();
    let mut base = base;
    merge_into(&mut base, overlay, &KeyPath::new(""), &mut replaced);
    (base, replaced)
}

fn merge_into(base: &mut Mapping, overlay: Mapping, prefix: &KeyPath, replaced: &mut Vec<KeyPath>) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(slot) => {
                let path = prefix.child(&key_label(&key));
                let previous = std::mem::take(slot);
                *slot = match (previous, value) {
                    (Value::Mapping(mut lhs), Value::Mapping(rhs)) => {
                        merge_into(&mut lhs, rhs, &path, replaced);
                        Value::Mapping(lhs)
                    }
                    (_, value) => {
                        replaced.push(path);
                        value
                    }
                };
            }
            None => {
                base.insert(key, value);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_overlay_wins_on_scalar() {
        let (merged, replaced) = merge_trees(mapping("lr: 0.1\nlayers: 3\n"), mapping("lr: 0.2\n"));

        assert_eq!(merged, mapping("lr: 0.2\nlayers: 3\n"));
        assert_eq!(replaced, vec![KeyPath::new("lr")]);
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let base = mapping("optim:\n  lr_initial: 0.001\n  max_epochs: 20\n");
        let overlay = mapping("optim:\n  max_epochs: 12\n  warmup_steps: 100\n");

        let (merged, replaced) = merge_trees(base, overlay);

        assert_eq!(
            merged,
            mapping("optim:\n  lr_initial: 0.001\n  max_epochs: 12\n  warmup_steps: 100\n")
        );
        assert_eq!(replaced, vec![KeyPath::new("optim.max_epochs")]);
    }

    #[test]
    fn test_sequences_overwrite_wholesale() {
        let base = mapping("labels: [energy, forces]\n");
        let overlay = mapping("labels: [energy]\n");

        let (merged, replaced) = merge_trees(base, overlay);

        assert_eq!(merged, mapping("labels: [energy]\n"));
        assert_eq!(replaced, vec![KeyPath::new("labels")]);
    }

    #[test]
    fn test_mapping_replaces_scalar() {
        let base = mapping("scheduler: cosine\n");
        let overlay = mapping("scheduler:\n  name: cosine\n  warmup: 10\n");

        let (merged, replaced) = merge_trees(base, overlay);

        assert_eq!(
            merged.get("scheduler").and_then(Value::as_mapping).map(Mapping::len),
            Some(2)
        );
        assert_eq!(replaced, vec![KeyPath::new("scheduler")]);
    }

    #[test]
    fn test_scalar_replaces_mapping() {
        let base = mapping("scheduler:\n  name: cosine\n");
        let overlay = mapping("scheduler: none\n");

        let (merged, replaced) = merge_trees(base, overlay);

        assert_eq!(
            merged.get("scheduler").and_then(Value::as_str),
            Some("none")
        );
        assert_eq!(replaced, vec![KeyPath::new("scheduler")]);
    }

    #[test]
    fn test_disjoint_merge_keeps_both() {
        let (merged, replaced) = merge_trees(mapping("a: 1\n"), mapping("b: 2\n"));

        assert_eq!(merged, mapping("a: 1\nb: 2\n"));
        assert!(replaced.is_empty());
    }

    #[test]
    fn test_base_key_order_preserved() {
        let (merged, _) = merge_trees(
            mapping("first: 1\nsecond: 2\nthird: 3\n"),
            mapping("second: 20\nnew: 4\n"),
        );

        let keys: Vec<String> = merged.keys().map(key_label).collect();
        assert_eq!(keys, vec!["first", "second", "third", "new"]);
    }

    #[test]
    fn test_identical_values_still_reported() {
        // A key supplied twice is a duplicate even when the values agree
        let (_, replaced) = merge_trees(mapping("lr: 0.1\n"), mapping("lr: 0.1\n"));
        assert_eq!(replaced, vec![KeyPath::new("lr")]);
    }
}

// =============================================================================
// Property Tests
// =============================================================================
