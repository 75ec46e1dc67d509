use crate::artifacts::objects::ENCODING_VERSION;
use byteorder::ReadBytesExt;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Byte tag used in the canonical encoding.
    pub fn tag(&self) -> u8 {
        match self {
            ObjectType::Blob => b'B',
            ObjectType::Tree => b'T',
            ObjectType::Commit => b'C',
        }
    }

    /// Consume the two-byte `<version><tag>` header and return the type.
    ///
    /// Leaves the reader positioned at the first field of the object body.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let version = reader.read_u8()?;
        if version != ENCODING_VERSION {
            anyhow::bail!("unsupported object encoding version: {}", version);
        }

        ObjectType::try_from(reader.read_u8()?)
    }
}

impl TryFrom<u8> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(tag: u8) -> anyhow::Result<Self> {
        match tag {
            b'B' => Ok(ObjectType::Blob),
            b'T' => Ok(ObjectType::Tree),
            b'C' => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("invalid object type tag: 0x{:02x}", tag)),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
