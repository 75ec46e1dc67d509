//! Commit objects
//!
//! A commit pins a root tree digest together with author, timestamp, message
//! and an ordered list of parent digests: none for the root commit, one for a
//! normal commit, two or more for merges. Commits are immutable; their digest
//! covers every field in a fixed order.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Read, Write};

/// Commit author identity with the moment of authorship.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: Option<String>,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    pub fn new(name: String, email: Option<String>) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: Option<String>,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Identity as persisted: `Name <email>` or just `Name`.
    pub fn identity(&self) -> String {
        match &self.email {
            Some(email) => format!("{} <{}>", self.name, email),
            None => self.name.clone(),
        }
    }

    /// Parse an identity string written by [`Author::identity`].
    pub fn parse_identity(
        identity: &str,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        match (identity.find('<'), identity.rfind('>')) {
            (Some(start), Some(end)) if start < end => Author {
                name: identity[..start].trim().to_string(),
                email: Some(identity[start + 1..end].to_string()),
                timestamp,
            },
            _ => Author {
                name: identity.trim().to_string(),
                email: None,
                timestamp,
            },
        }
    }

    /// Read the author identity from `JOT_AUTHOR_NAME` / `JOT_AUTHOR_EMAIL`,
    /// with `JOT_AUTHOR_DATE` overriding the timestamp for reproducible
    /// commits.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("JOT_AUTHOR_NAME").context("JOT_AUTHOR_NAME not set")?;
        let email = std::env::var("JOT_AUTHOR_EMAIL").ok();
        let timestamp = std::env::var("JOT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Timestamp in human-readable form, e.g. `Mon Jan 1 12:34:56 2024 +0000`.
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            author,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for one-line displays.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.author.timestamp()
    }
}

fn write_str_field<W: Write>(writer: &mut W, value: &str) -> anyhow::Result<()> {
    writer.write_u32::<BigEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_str_field<R: Read>(reader: &mut R) -> anyhow::Result<String> {
    let len = reader.read_u32::<BigEndian>()? as usize;
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

impl Packable for Commit {
    // Field order is fixed: author, timestamp, message, tree digest, parents.
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();

        write_str_field(&mut body, &self.author.identity())?;
        body.write_i64::<BigEndian>(self.author.timestamp().timestamp())?;
        body.write_i32::<BigEndian>(self.author.timestamp().offset().local_minus_utc())?;
        write_str_field(&mut body, &self.message)?;
        self.tree_oid.write_raw_to(&mut body)?;
        body.write_u32::<BigEndian>(self.parents.len() as u32)?;
        for parent in &self.parents {
            parent.write_raw_to(&mut body)?;
        }

        self.pack_with_header(body)
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let identity = read_str_field(&mut reader)?;
        let seconds = reader.read_i64::<BigEndian>()?;
        let offset_seconds = reader.read_i32::<BigEndian>()?;
        let message = read_str_field(&mut reader)?;
        let tree_oid = ObjectId::read_raw_from(&mut reader)?;

        let parent_count = reader.read_u32::<BigEndian>()?;
        let mut parents = Vec::with_capacity(parent_count as usize);
        for _ in 0..parent_count {
            parents.push(ObjectId::read_raw_from(&mut reader)?);
        }

        let offset = chrono::FixedOffset::east_opt(offset_seconds)
            .context("invalid timezone offset in commit")?;
        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)
            .context("invalid timestamp in commit")?
            .with_timezone(&offset);

        let author = Author::parse_identity(&identity, timestamp);
        Ok(Commit::new(parents, tree_oid, author, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
