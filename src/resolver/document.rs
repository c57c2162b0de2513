//! Configuration Documents
//!
//! Loading of raw configuration documents and the resolved form produced by
//! the resolver. A document is read once from disk, resolved once, then
//! treated as immutable by downstream consumers.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use sha2::{Digest, Sha256};

use crate::constants::resolver::INCLUDES_KEY;
use crate::types::{Result, TrainCfgError};

// =============================================================================
// ConfigDocument
// =============================================================================

/// A single configuration document as read from disk
///
/// The reserved `includes` key is extracted at load time; the remaining tree
/// holds the document's own keys only.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    tree: Mapping,
    includes: Vec<PathBuf>,
}

impl ConfigDocument {
    /// Load a document from disk
    ///
    /// Fails with `NotFound` when the file is missing, and `Malformed` when
    /// the content is not valid YAML, the top level is not a mapping, or the
    /// `includes` key is not a sequence of path strings.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrainCfgError::not_found(path)
            } else {
                TrainCfgError::Io(e)
            }
        })?;

        let value: Value = serde_yaml::from_str(&raw)
            .map_err(|e| TrainCfgError::malformed(path, e.to_string()))?;

        let mut tree = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => {
                return Err(TrainCfgError::malformed(path, "document is empty"));
            }
            other => {
                return Err(TrainCfgError::malformed(
                    path,
                    format!("top level must be a mapping, found {}", value_kind(&other)),
                ));
            }
        };

        let includes = match tree.remove(INCLUDES_KEY) {
            None => Vec::new(),
            Some(Value::Sequence(entries)) => {
                let mut paths = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        Value::String(s) => paths.push(PathBuf::from(s)),
                        other => {
                            return Err(TrainCfgError::malformed(
                                path,
                                format!(
                                    "includes entries must be path strings, found {}",
                                    value_kind(&other)
                                ),
                            ));
                        }
                    }
                }
                paths
            }
            Some(other) => {
                return Err(TrainCfgError::malformed(
                    path,
                    format!(
                        "includes must be a sequence of paths, found {}",
                        value_kind(&other)
                    ),
                ));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            tree,
            includes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory against which this document's include paths resolve
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The document's own keys (with `includes` already removed)
    pub fn tree(&self) -> &Mapping {
        &self.tree
    }

    pub fn into_tree(self) -> Mapping {
        self.tree
    }

    /// Include targets in declaration order (lower precedence first)
    pub fn includes(&self) -> &[PathBuf] {
        &self.includes
    }
}

// =============================================================================
// ResolvedConfig
// =============================================================================

/// A fully merged configuration tree with no remaining `includes` key
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    tree: Mapping,
}

impl ResolvedConfig {
    pub(crate) fn new(tree: Mapping) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Mapping {
        &self.tree
    }

    pub fn into_tree(self) -> Mapping {
        self.tree
    }

    /// Look up a value by dotted key path (e.g. `optim.lr_initial`)
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        let mut segments = key_path.split('.');
        let first = segments.next()?;
        let mut current = self.tree.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Render the tree as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.tree)?)
    }

    /// Render the tree as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    /// Deserialize the tree into a typed view
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_yaml::from_value(Value::Mapping(self.tree.clone()))?)
    }

    /// SHA-256 fingerprint over a canonical (key-sorted) JSON encoding
    ///
    /// Invariant under key ordering, sensitive to any value change. Suitable
    /// for tagging run output with the exact configuration that produced it.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = canonical_json(&Value::Mapping(self.tree.clone()))?;
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(&canonical)?);
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Convert a YAML value to JSON with mapping keys sorted at every level
fn canonical_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Mapping(mapping) => {
            // serde_json's default map is BTreeMap-backed, so insertion sorts
            let mut object = serde_json::Map::new();
            for (key, val) in mapping {
                object.insert(key_label(key), canonical_json(val)?);
            }
            serde_json::Value::Object(object)
        }
        Value::Sequence(entries) => serde_json::Value::Array(
            entries
                .iter()
                .map(canonical_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        other => serde_json::to_value(other)?,
    })
}

/// Human-readable label for a mapping key
pub(crate) fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| String::from("?")),
    }
}

/// Short description of a value's type for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// =============================================================================
// Tests
// =============================================================================
