//! Core repository components
//!
//! The fundamental building blocks of a repository:
//!
//! - `object_store`: content-addressable storage for blobs, trees and commits
//! - `index`: staging area consumed by the next commit
//! - `refs`: branch pointers and the two-state HEAD
//! - `commit_graph`: commit creation and history traversal
//! - `workspace`: working-directory file system operations
//! - `repository`: high-level coordination of the above

pub mod commit_graph;
pub mod index;
pub mod object_store;
pub mod refs;
pub mod repository;
pub mod workspace;
