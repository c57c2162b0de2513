//! Command-Line Overrides
//!
//! Dotted `key.path=value` assignments applied on top of a resolved tree.
//! Values parse as YAML scalars, so `optim.max_epochs=12`,
//! `model.regress_forces=true` and `task.labels=[energy]` all keep their
//! natural types. Intermediate mappings are created on demand.

use serde_yaml::{Mapping, Value};

use super::document::value_kind;
use crate::types::{KeyPath, Result, TrainCfgError};

/// Apply `key.path=value` assignments to a configuration tree
///
/// Returns the key paths that were written, in application order.
pub fn apply_overrides(tree: &mut Mapping, assignments: &[String]) -> Result<Vec<KeyPath>> {
    let mut applied = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        applied.push(apply_one(tree, assignment)?);
    }
    Ok(applied)
}

fn apply_one(tree: &mut Mapping, assignment: &str) -> Result<KeyPath> {
    let (key_path, raw_value) = assignment.split_once('=').ok_or_else(|| {
        TrainCfgError::Override(format!("expected key.path=value, got '{assignment}'"))
    })?;

    let segments: Vec<&str> = key_path.split('.').collect();
    if key_path.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(TrainCfgError::Override(format!(
            "empty key segment in '{assignment}'"
        )));
    }

    let value = parse_value(raw_value)?;

    let Some((last, parents)) = segments.split_last() else {
        return Err(TrainCfgError::Override(format!(
            "empty key path in '{assignment}'"
        )));
    };
    let mut cursor = tree;
    let mut walked = KeyPath::new("");
    for segment in parents {
        walked = walked.child(segment);
        if !cursor.contains_key(*segment) {
            cursor.insert(
                Value::String(segment.to_string()),
                Value::Mapping(Mapping::new()),
            );
        }
        cursor = match cursor.get_mut(*segment) {
            Some(Value::Mapping(inner)) => inner,
            Some(other) => {
                return Err(TrainCfgError::Override(format!(
                    "cannot descend into '{walked}': existing value is {}",
                    value_kind(other)
                )));
            }
            None => unreachable!("segment inserted above"),
        };
    }

    cursor.insert(Value::String(last.to_string()), value);
    Ok(walked.child(last))
}

/// Parse an override value as a YAML scalar
fn parse_value(raw: &str) -> Result<Value> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(raw)
        .map_err(|e| TrainCfgError::Override(format!("cannot parse value '{raw}': {e}")))
}

// =============================================================================
// Tests
// =============================================================================
