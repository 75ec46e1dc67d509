//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character hexadecimal strings identifying blobs, trees
//! and commits by the digest of their canonical bytes. Objects live as
//! `.vcsmeta/objects/<hex-digest>`, one flat file per object.

use crate::artifacts::objects::{DIGEST_HEX_LENGTH, DIGEST_RAW_LENGTH};
use std::io;
use std::path::PathBuf;

/// Content digest of a stored object.
///
/// A 40-character hexadecimal string. Tree and commit encodings embed the
/// raw 20-byte form; everywhere else the hex form is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a digest from its hex representation.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != DIGEST_HEX_LENGTH {
            return Err(anyhow::anyhow!("invalid digest length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("invalid digest characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Write the digest in raw binary form (20 bytes).
    ///
    /// Used when embedding digests inside tree and commit encodings.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        for i in (0..DIGEST_HEX_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read a digest from its raw binary form (20 bytes).
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; DIGEST_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        let mut hex = String::with_capacity(DIGEST_HEX_LENGTH);
        for byte in raw {
            hex.push_str(&format!("{:02x}", byte));
        }

        Self::try_parse(hex)
    }

    /// Relative path of this object inside the store's `objects/` directory.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Abbreviated digest (first 7 characters) for display.
    pub fn to_short(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
