//! Error taxonomy for repository operations.
//!
//! Commands propagate these through `anyhow::Result` without remapping, so a
//! failure anywhere in the pipeline surfaces to the CLI with its original
//! kind intact. Store corruption aborts only the operation that touched the
//! corrupt object; the rest of the store stays usable.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    #[error("not a jot repository (no .vcsmeta directory in {} or any parent)", .0.display())]
    NoRepository(PathBuf),

    #[error("object {0} not found in store")]
    ObjectNotFound(ObjectId),

    #[error("object {0} is corrupt: stored bytes do not match their digest")]
    CorruptObject(ObjectId),

    #[error("unknown parent commit {0}")]
    UnknownParent(ObjectId),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("branch {0} does not exist")]
    NoBranchExists(String),

    #[error("cannot delete branch {0}: it is currently checked out")]
    CannotDeleteCurrentBranch(String),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}
