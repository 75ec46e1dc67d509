//! Stored object types and their canonical encoding
//!
//! Every object persists as an explicit, versioned byte format rather than a
//! runtime's native serialization, so digests are a pure function of semantic
//! content:
//!
//! ```text
//! <version:u8><tag:u8><fields...>
//! ```
//!
//! - **Blob**: `u32` length + raw file bytes
//! - **Tree**: `u32` entry count, then name-sorted entries of
//!   `<kind:u8><u32 name-len><name><20-byte digest>`
//! - **Commit**: length-prefixed author, `i64` timestamp seconds, `i32`
//!   timezone offset, length-prefixed message, 20-byte tree digest,
//!   `u32` parent count + 20-byte parent digests
//!
//! Length prefixes are big-endian. Field order is fixed, so two independent
//! implementations hashing the same semantic content produce the same digest.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 digest in hexadecimal form
pub const DIGEST_HEX_LENGTH: usize = 40;

/// Length of a SHA-1 digest in raw bytes
pub const DIGEST_RAW_LENGTH: usize = 20;

/// Current canonical encoding version
pub const ENCODING_VERSION: u8 = 1;
