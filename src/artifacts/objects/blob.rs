//! Blob object
//!
//! Blobs hold raw file content and nothing else; names live in trees. Each
//! unique content is stored once, keyed by its digest.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::with_capacity(self.content.len() + 4);
        body.write_u32::<BigEndian>(self.content.len() as u32)?;
        body.write_all(&self.content)?;

        self.pack_with_header(body)
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let len = reader.read_u32::<BigEndian>()? as usize;
        let mut content = vec![0u8; len];
        reader.read_exact(&mut content)?;

        Ok(Blob::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_type::ObjectType;
    use proptest::prelude::*;
    use std::io::Cursor;

    proptest! {
        #[test]
        fn serialize_then_deserialize_is_identity(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let blob = Blob::new(Bytes::from(content));
            let bytes = blob.serialize().unwrap();

            let mut reader = Cursor::new(bytes);
            let object_type = ObjectType::parse_header(&mut reader).unwrap();
            prop_assert_eq!(object_type, ObjectType::Blob);

            let decoded = Blob::deserialize(reader).unwrap();
            prop_assert_eq!(decoded, blob);
        }

        #[test]
        fn identical_content_hashes_identically(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let first = Blob::new(Bytes::from(content.clone()));
            let second = Blob::new(Bytes::from(content));
            prop_assert_eq!(first.object_id().unwrap(), second.object_id().unwrap());
        }
    }
}
