//! Domain artifacts
//!
//! - `objects`: the stored object kinds and their canonical encoding
//! - `branch`: branch names and revision resolution
//! - `checkout`: snapshot materialization into the workspace
//! - `core`: shared utilities

pub mod branch;
pub mod checkout;
pub mod core;
pub mod objects;
