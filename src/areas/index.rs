//! The staging area
//!
//! The index maps workspace-relative paths to blob digests and is exactly
//! what the next commit snapshots. It persists as a text file with one
//! `<path> <digest>` line per entry; staging is last-write-wins per path.

use crate::areas::object_store::ObjectStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
    entries: BTreeMap<PathBuf, ObjectId>,
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    /// Rehydrate entries from disk. A missing index file means empty.
    pub fn load(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path.as_ref())
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            // the digest never contains whitespace, the path may
            let (path, digest) = line
                .rsplit_once(char::is_whitespace)
                .with_context(|| format!("malformed index line: {}", line))?;
            self.entries.insert(
                PathBuf::from(path.trim_end()),
                ObjectId::try_parse(digest.to_string())?,
            );
        }

        Ok(())
    }

    /// Write entries back to disk if anything changed since loading.
    pub fn save(&mut self) -> anyhow::Result<()> {
        if !self.changed && self.path.exists() {
            return Ok(());
        }

        let mut content = String::new();
        for (path, oid) in &self.entries {
            content.push_str(&format!("{} {}\n", path.display(), oid));
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path.as_ref())
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        self.changed = false;
        Ok(())
    }

    /// Store a workspace file's content as a blob and record the mapping.
    ///
    /// Restaging a path overwrites its previous digest. Directories are not
    /// stageable; callers expand them to files first.
    pub fn stage(
        &mut self,
        workspace: &Workspace,
        store: &ObjectStore,
        path: &Path,
    ) -> anyhow::Result<ObjectId> {
        if workspace.is_dir(path) {
            return Err(Error::NotRegularFile(path.to_path_buf()).into());
        }

        let content = workspace.read_file(path)?;
        let oid = store.store(&Blob::new(content))?;

        self.entries.insert(path.to_path_buf(), oid.clone());
        self.changed = true;

        Ok(oid)
    }

    /// Drop a path from the staging area. Unstaging an absent path is a
    /// no-op; the blob stays in the store either way.
    pub fn unstage(&mut self, path: &Path) {
        if self.entries.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Record a known path-to-digest mapping without touching the store.
    ///
    /// Used when rebuilding the index from a materialized snapshot.
    pub fn record(&mut self, path: PathBuf, oid: ObjectId) {
        self.entries.insert(path, oid);
        self.changed = true;
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.iter()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
