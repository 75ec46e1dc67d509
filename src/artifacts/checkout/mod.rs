//! Snapshot materialization
//!
//! Checkout replaces the working directory with the snapshot of a target
//! commit: resolve the revision, clear everything except the metadata
//! directory, write the commit's tree back out, rebuild the index to match,
//! and repoint HEAD. Resolution happens before anything destructive, so a
//! bad revision leaves the workspace untouched.

use crate::areas::commit_graph::CommitGraph;
use crate::areas::index::Index;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::{Resolved, Revision};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(new)]
pub struct Checkout<'r> {
    repository: &'r Repository,
}

impl Checkout<'_> {
    /// Switch the workspace to the snapshot named by `target`.
    pub fn run(&self, target: &str) -> anyhow::Result<Resolved> {
        let resolved = Revision::parse(target).resolve(self.repository)?;

        let graph = CommitGraph::new(self.repository.store());
        let commit = graph.get_commit(resolved.oid())?;

        self.repository.workspace().clean()?;

        let mut index = self.repository.open_index();
        index.load()?;
        index.clear();
        self.materialize(commit.tree_oid(), Path::new(""), &mut index)?;
        index.save()?;

        match &resolved {
            Resolved::Branch(name, _) => {
                self.repository.refs().set_head(&Head::Symbolic(name.clone()))?;
            }
            Resolved::Detached(oid) => {
                self.repository.refs().set_head(&Head::Detached(oid.clone()))?;
            }
        }

        Ok(resolved)
    }

    fn materialize(
        &self,
        tree_oid: &ObjectId,
        prefix: &Path,
        index: &mut Index,
    ) -> anyhow::Result<()> {
        let tree = self
            .repository
            .store()
            .load_tree(tree_oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a tree", tree_oid))?;

        for (name, entry) in tree.entries() {
            let path: PathBuf = prefix.join(name);

            match entry.kind {
                ObjectType::Blob => {
                    let blob = self
                        .repository
                        .store()
                        .load_blob(&entry.oid)?
                        .ok_or_else(|| anyhow::anyhow!("object {} is not a blob", entry.oid))?;
                    self.repository
                        .workspace()
                        .write_file(&path, blob.content())?;
                    index.record(path, entry.oid.clone());
                }
                ObjectType::Tree => {
                    self.repository.workspace().make_dir(&path)?;
                    self.materialize(&entry.oid, &path, index)?;
                }
                ObjectType::Commit => {
                    anyhow::bail!("tree entry {} references a commit", path.display())
                }
            }
        }

        Ok(())
    }
}
