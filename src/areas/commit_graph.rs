//! Commit creation and history traversal
//!
//! History walks follow parent edges from a starting commit, yielding each
//! reachable commit once, newest timestamp first. Ties break on digest so
//! the order is deterministic; for a linear chain the order equals the
//! chain order regardless of timestamps skewing backwards.

use crate::areas::object_store::ObjectStore;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use derive_new::new;
use std::collections::{BinaryHeap, HashSet};

#[derive(Debug, new)]
pub struct CommitGraph<'s> {
    store: &'s ObjectStore,
}

impl<'s> CommitGraph<'s> {
    /// Store a new commit after checking every named parent exists.
    pub fn create_commit(
        &self,
        author: Author,
        message: String,
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        for parent in &parents {
            if !self.store.exists(parent) {
                return Err(Error::UnknownParent(parent.clone()).into());
            }
        }

        self.store
            .store(&Commit::new(parents, tree_oid, author, message))
    }

    pub fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.store
            .load_commit(oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", oid))
    }

    /// Walk history starting from a commit.
    pub fn history(&self, start: &ObjectId) -> anyhow::Result<History<'s>> {
        let mut history = History {
            store: self.store,
            frontier: BinaryHeap::new(),
            visited: HashSet::new(),
            pending_error: None,
        };

        let commit = self.get_commit(start)?;
        history.visited.insert(start.clone());
        history.frontier.push(QueuedCommit {
            oid: start.clone(),
            commit,
        });

        Ok(history)
    }
}

#[derive(Debug)]
struct QueuedCommit {
    oid: ObjectId,
    commit: Commit,
}

impl PartialEq for QueuedCommit {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for QueuedCommit {}

impl PartialOrd for QueuedCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.commit
            .timestamp()
            .cmp(&other.commit.timestamp())
            .then_with(|| self.oid.cmp(&other.oid))
    }
}

/// Lazy newest-first iterator over reachable commits.
pub struct History<'s> {
    store: &'s ObjectStore,
    frontier: BinaryHeap<QueuedCommit>,
    visited: HashSet<ObjectId>,
    pending_error: Option<anyhow::Error>,
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending_error.take() {
            self.frontier.clear();
            return Some(Err(error));
        }

        let queued = self.frontier.pop()?;

        for parent in queued.commit.parents() {
            if !self.visited.insert(parent.clone()) {
                continue;
            }

            let graph = CommitGraph::new(self.store);
            match graph.get_commit(parent) {
                Ok(commit) => self.frontier.push(QueuedCommit {
                    oid: parent.clone(),
                    commit,
                }),
                // yield the current commit first, surface the failure next
                Err(error) => self.pending_error = Some(error),
            }
        }

        Some(Ok((queued.oid, queued.commit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::tree::Tree;

    fn temp_store() -> (assert_fs::TempDir, ObjectStore) {
        let dir = assert_fs::TempDir::new().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf().into_boxed_path());
        (dir, store)
    }

    fn author_at(hour: u32) -> Author {
        let timestamp = chrono::DateTime::parse_from_str(
            &format!("2024-03-01 {:02}:00:00 +0000", hour),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .unwrap();
        Author::new_with_timestamp("u".to_string(), None, timestamp)
    }

    fn empty_tree_oid(store: &ObjectStore) -> ObjectId {
        store.store(&Tree::default()).unwrap()
    }

    #[test]
    fn commit_with_unknown_parent_is_rejected() {
        let (_dir, store) = temp_store();
        let graph = CommitGraph::new(&store);
        let missing = ObjectId::try_parse("ab".repeat(20)).unwrap();

        let err = graph
            .create_commit(
                author_at(10),
                "msg".to_string(),
                empty_tree_oid(&store),
                vec![missing],
            )
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownParent(_))
        ));
    }

    #[test]
    fn linear_history_yields_newest_first() {
        let (_dir, store) = temp_store();
        let graph = CommitGraph::new(&store);
        let tree = empty_tree_oid(&store);

        let first = graph
            .create_commit(author_at(9), "first".to_string(), tree.clone(), vec![])
            .unwrap();
        let second = graph
            .create_commit(author_at(10), "second".to_string(), tree.clone(), vec![first.clone()])
            .unwrap();
        let third = graph
            .create_commit(author_at(11), "third".to_string(), tree, vec![second.clone()])
            .unwrap();

        let oids = graph
            .history(&third)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect::<Vec<_>>();
        assert_eq!(oids, vec![third, second, first]);
    }

    #[test]
    fn merge_history_yields_each_commit_once() {
        let (_dir, store) = temp_store();
        let graph = CommitGraph::new(&store);
        let tree = empty_tree_oid(&store);

        let root = graph
            .create_commit(author_at(8), "root".to_string(), tree.clone(), vec![])
            .unwrap();
        let left = graph
            .create_commit(author_at(9), "left".to_string(), tree.clone(), vec![root.clone()])
            .unwrap();
        let right = graph
            .create_commit(author_at(10), "right".to_string(), tree.clone(), vec![root.clone()])
            .unwrap();
        let merge = graph
            .create_commit(
                author_at(11),
                "merge".to_string(),
                tree,
                vec![left.clone(), right.clone()],
            )
            .unwrap();

        let oids = graph
            .history(&merge)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect::<Vec<_>>();
        assert_eq!(oids, vec![merge, right, left, root]);
    }

    #[test]
    fn equal_timestamps_order_deterministically() {
        let (_dir, store) = temp_store();
        let graph = CommitGraph::new(&store);
        let tree = empty_tree_oid(&store);

        let root = graph
            .create_commit(author_at(8), "root".to_string(), tree.clone(), vec![])
            .unwrap();
        let a = graph
            .create_commit(author_at(9), "a".to_string(), tree.clone(), vec![root.clone()])
            .unwrap();
        let b = graph
            .create_commit(author_at(9), "b".to_string(), tree.clone(), vec![root.clone()])
            .unwrap();
        let merge = graph
            .create_commit(author_at(9), "merge".to_string(), tree, vec![a.clone(), b.clone()])
            .unwrap();

        let first = graph
            .history(&merge)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect::<Vec<_>>();
        let second = graph
            .history(&merge)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first.first(), Some(&merge));
        assert_eq!(first.last(), Some(&root));
    }
}
