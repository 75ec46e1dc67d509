//! Branch pointers and HEAD
//!
//! Branches are text files under `references/` holding the hex digest of
//! their tip commit; hierarchical names nest into subdirectories. The `head`
//! file is either symbolic (`ref: <branch>`) or a bare digest (detached).
//!
//! A symbolic HEAD may name a branch whose pointer file does not exist yet:
//! the unborn state between `init` and the first commit.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// The two states of HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// On a branch; commits advance the branch pointer.
    Symbolic(BranchName),
    /// Directly on a commit; commits move HEAD itself.
    Detached(ObjectId),
}

impl Head {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let content = content.trim();

        match content.strip_prefix("ref: ") {
            Some(branch) => Ok(Head::Symbolic(BranchName::try_parse(branch.to_string())?)),
            None => Ok(Head::Detached(ObjectId::try_parse(content.to_string())?)),
        }
    }

    pub fn branch_name(&self) -> Option<&BranchName> {
        match self {
            Head::Symbolic(name) => Some(name),
            Head::Detached(_) => None,
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Symbolic(name) => write!(f, "ref: {}", name),
            Head::Detached(oid) => write!(f, "{}", oid),
        }
    }
}

/// Reference manager rooted at the metadata directory.
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join("head").into_boxed_path()
    }

    pub fn references_path(&self) -> Box<Path> {
        self.path.join("references").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.references_path().join(name.as_ref_path()).into_boxed_path()
    }

    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read head file at {:?}", head_path))?;

        Head::parse(&content)
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), head.to_string())
    }

    /// The commit HEAD currently points at, following the branch indirection.
    ///
    /// `None` means HEAD names an unborn branch.
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Symbolic(name) => self.read_branch(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// The tip digest of a branch, or `None` if its pointer file is absent.
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    /// Create a branch pointing at the given commit and move HEAD onto it.
    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        if branch_path.exists() {
            return Err(Error::BranchAlreadyExists(name.to_string()).into());
        }

        self.update_ref_file(branch_path, source_oid.to_string())?;
        self.set_head(&Head::Symbolic(name.clone()))
    }

    /// Delete a branch pointer and return the digest it held.
    ///
    /// The branch being checked out cannot be deleted; the commits it pointed
    /// at stay in the store regardless.
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(Error::NoBranchExists(name.to_string()).into());
        }

        if self.read_head()?.branch_name() == Some(name) {
            return Err(Error::CannotDeleteCurrentBranch(name.to_string()).into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;
        let oid = ObjectId::try_parse(content.trim().to_string())?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_empty_parent_dirs(&branch_path)?;

        Ok(oid)
    }

    /// Advance the current position to a new commit.
    ///
    /// On a branch this moves the branch pointer (creating it for an unborn
    /// branch); detached it rewrites HEAD itself.
    pub fn update_current(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Symbolic(name) => self.update_ref_file(self.branch_path(&name), oid.to_string()),
            Head::Detached(_) => self.set_head(&Head::Detached(oid.clone())),
        }
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let references_path = self.references_path();
        let mut branches = WalkDir::new(&references_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(references_path.as_ref()).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.references_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
