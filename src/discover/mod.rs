//! Config Discovery
//!
//! Walks a configs root and collects the configuration documents under it.
//! Gitignore rules are honored and symlinks are never followed.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::constants::discover::{CONFIG_EXTENSIONS, DEFAULT_SKIP_DIRS};

/// Scans a directory tree for configuration documents
pub struct ConfigScanner {
    root: PathBuf,
    extensions: Vec<String>,
}

impl ConfigScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: CONFIG_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Override the recognized file extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Collect matching documents, sorted for deterministic output
    pub fn scan(&self) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !DEFAULT_SKIP_DIRS.contains(&name.as_ref())
            })
            .build();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|known| known == ext));
            if matches {
                paths.push(path.to_path_buf());
            }
        }

        paths.sort();
        paths
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "x: 1\n").unwrap();
    }

    #[test]
    fn test_finds_yaml_documents() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "base.yml");
        touch(&dir, "nested/optim.yaml");
        touch(&dir, "notes.txt");

        let found = ConfigScanner::new(dir.path()).scan();

        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|p| p.ends_with("base.yml")));
        assert!(found.iter().any(|p| p.ends_with("nested/optim.yaml")));
    }

    #[test]
    fn test_skips_default_directories() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "keep.yml");
        touch(&dir, "__pycache__/cached.yml");
        touch(&dir, "target/out.yml");

        let found = ConfigScanner::new(dir.path()).scan();

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("keep.yml"));
    }

    #[test]
    fn test_output_is_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "b.yml");
        touch(&dir, "a.yml");
        touch(&dir, "c.yml");

        let found = ConfigScanner::new(dir.path()).scan();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yml", "c.yml"]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.yml");
        touch(&dir, "b.conf");

        let found = ConfigScanner::new(dir.path())
            .with_extensions(vec!["conf".to_string()])
            .scan();

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("b.conf"));
    }
}
