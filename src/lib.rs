//! A minimal version-control engine built on a content-addressable object
//! store.
//!
//! Working-tree files flow through the staging index into Merkle trees of
//! blobs, which commits then pin together into a history DAG. Branches and
//! HEAD are plain pointer files under the `.vcsmeta` metadata directory.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the repository metadata directory at the workspace root.
pub const META_DIR: &str = ".vcsmeta";

/// Branch created by `init` and pointed at by the initial HEAD.
pub const DEFAULT_BRANCH: &str = "master";
