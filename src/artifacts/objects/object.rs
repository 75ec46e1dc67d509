use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::ENCODING_VERSION;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Serialize into the canonical, versioned byte encoding.
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Deserialize an object body from a reader positioned past the
/// `<version><tag>` header.
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Digest of the canonical bytes. Identical semantic content always
    /// yields an identical digest, independent of construction order.
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let digest = hasher.finalize();
        ObjectId::try_parse(format!("{digest:x}"))
    }

    /// Prepend the `<version><tag>` header to an encoded object body.
    fn pack_with_header(&self, body: Vec<u8>) -> Result<Bytes> {
        let mut bytes = Vec::with_capacity(body.len() + 2);
        bytes.push(ENCODING_VERSION);
        bytes.push(self.object_type().tag());
        bytes.extend(body);

        Ok(Bytes::from(bytes))
    }
}

/// Compute the digest a byte sequence would be stored under.
pub fn digest_of(content: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(content);

    let digest = hasher.finalize();
    ObjectId::try_parse(format!("{digest:x}"))
}
