//! Tree objects and the Merkle-tree builder
//!
//! A tree is a directory snapshot: name-sorted entries pointing at blobs
//! (files) and other trees (subdirectories) by digest. Because entries are
//! sorted before hashing, a tree's digest is a pure function of its
//! `(name, kind, digest)` set; the order entries were added never matters.
//!
//! [`TreeBuilder`] turns a staging-index snapshot into stored trees bottom-up:
//! a subtree's digest is computed from fully-resolved children before its
//! parent is encoded. Unchanged subtrees across commits reuse identical
//! digests, so they share storage for free.

use crate::META_DIR;
use crate::areas::index::Index;
use crate::areas::object_store::ObjectStore;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};
use std::path::Path;

/// A single tree entry: a named blob or subtree reference.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub kind: ObjectType,
    pub oid: ObjectId,
}

/// One directory level of a snapshot. Entries are kept name-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    pub fn add_entry(&mut self, name: impl Into<String>, kind: ObjectType, oid: ObjectId) {
        self.entries.insert(name.into(), TreeEntry::new(kind, oid));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();
        body.write_u32::<BigEndian>(self.entries.len() as u32)?;

        // BTreeMap iteration gives the name-sorted order the digest depends on
        for (name, entry) in &self.entries {
            let kind_tag = match entry.kind {
                ObjectType::Blob => b'b',
                ObjectType::Tree => b't',
                ObjectType::Commit => anyhow::bail!("tree entry {} cannot reference a commit", name),
            };
            body.write_u8(kind_tag)?;
            body.write_u32::<BigEndian>(name.len() as u32)?;
            body.write_all(name.as_bytes())?;
            entry.oid.write_raw_to(&mut body)?;
        }

        self.pack_with_header(body)
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let count = reader.read_u32::<BigEndian>()?;
        let mut entries = BTreeMap::new();

        for _ in 0..count {
            let kind = match reader.read_u8()? {
                b'b' => ObjectType::Blob,
                b't' => ObjectType::Tree,
                tag => anyhow::bail!("invalid tree entry kind tag: 0x{:02x}", tag),
            };

            let name_len = reader.read_u32::<BigEndian>()? as usize;
            let mut name = vec![0u8; name_len];
            reader.read_exact(&mut name)?;
            let name = String::from_utf8(name)?;

            let oid = ObjectId::read_raw_from(&mut reader)?;
            entries.insert(name, TreeEntry::new(kind, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

/// Nested working representation used while grouping staged paths by
/// directory. Only the builder sees this; stored trees are flat levels.
#[derive(Debug, Default)]
struct TreeScaffold {
    files: BTreeMap<String, ObjectId>,
    dirs: BTreeMap<String, TreeScaffold>,
}

impl TreeScaffold {
    fn insert(&mut self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        let mut components = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned());

        let first = components
            .next()
            .ok_or_else(|| anyhow::anyhow!("cannot stage an empty path"))?;
        let rest = components.collect::<Vec<_>>();

        if rest.is_empty() {
            self.files.insert(first, oid);
        } else {
            self.dirs
                .entry(first)
                .or_default()
                .insert(&rest.iter().collect::<std::path::PathBuf>(), oid)?;
        }

        Ok(())
    }
}

/// Builds and stores the Merkle tree for an index snapshot.
#[derive(Debug, new)]
pub struct TreeBuilder<'s> {
    store: &'s ObjectStore,
}

impl TreeBuilder<'_> {
    /// Store the snapshot's trees bottom-up and return the root tree digest.
    ///
    /// Two snapshots with identical path-to-content mappings always produce
    /// the same root digest, independent of staging order. Paths under the
    /// metadata directory are never included.
    pub fn build(&self, index: &Index) -> anyhow::Result<ObjectId> {
        let mut root = TreeScaffold::default();

        for (path, oid) in index.entries() {
            if path.starts_with(META_DIR) {
                continue;
            }
            root.insert(path, oid.clone())?;
        }

        self.store_level(&root)
    }

    // Children are stored before their parent so every entry digest is
    // final when the parent level is encoded.
    fn store_level(&self, scaffold: &TreeScaffold) -> anyhow::Result<ObjectId> {
        let mut tree = Tree::default();

        for (name, child) in &scaffold.dirs {
            let child_oid = self.store_level(child)?;
            tree.add_entry(name.clone(), ObjectType::Tree, child_oid);
        }
        for (name, oid) in &scaffold.files {
            tree.add_entry(name.clone(), ObjectType::Blob, oid.clone());
        }

        self.store.store(&tree)
    }
}
