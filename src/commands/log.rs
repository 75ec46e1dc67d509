use crate::areas::commit_graph::CommitGraph;
use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print the history reachable from HEAD, newest first.
    ///
    /// Before the first commit there is nothing to show and nothing is
    /// printed.
    pub fn log(&mut self) -> anyhow::Result<()> {
        let Some(start) = self.refs().resolve_head()? else {
            return Ok(());
        };

        let graph = CommitGraph::new(self.store());

        for item in graph.history(&start)? {
            let (oid, commit) = item?;

            writeln!(self.writer(), "{}", format!("commit {}", oid).yellow())?;
            writeln!(self.writer(), "Author: {}", commit.author().identity())?;
            writeln!(
                self.writer(),
                "Date:   {}",
                commit.author().readable_timestamp()
            )?;
            writeln!(self.writer())?;
            for line in commit.message().lines() {
                writeln!(self.writer(), "    {}", line)?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
