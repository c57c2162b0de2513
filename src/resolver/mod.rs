//! Config Resolution
//!
//! Hierarchical resolution of training-configuration documents:
//! 1. Load the named document
//! 2. Recursively resolve its `includes` chain (cycle-checked)
//! 3. Deep-merge included trees as a base beneath the document's own keys
//! 4. Return one flattened tree with no remaining `includes` key
//!
//! Resolution is synchronous and pure apart from local file reads; each
//! call is independent and reentrant.

mod document;
mod merge;
mod overrides;
mod resolve;

pub use document::{ConfigDocument, ResolvedConfig};
pub use merge::merge_trees;
pub use overrides::apply_overrides;
pub use resolve::{Resolution, Resolver, resolve};
