use crate::areas::commit_graph::CommitGraph;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::tree::TreeBuilder;
use std::io::Write;

impl Repository {
    /// Snapshot the staging area into a new commit and advance the current
    /// position to it.
    ///
    /// An empty index commits an empty tree; that is not an error.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut index = self.open_index();
        index.load()?;

        let tree_oid = TreeBuilder::new(self.store()).build(&index)?;

        let parent = self.refs().resolve_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };
        let parents = parent.into_iter().collect::<Vec<_>>();

        let author = Author::load_from_env()?;
        let message = message.trim().to_string();
        let short_message = message.lines().next().unwrap_or("").to_string();

        let graph = CommitGraph::new(self.store());
        let commit_oid = graph.create_commit(author, message, tree_oid, parents)?;

        self.refs().update_current(&commit_oid)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_oid.to_short(),
            short_message
        )?;

        Ok(())
    }
}
