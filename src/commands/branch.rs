use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// List branches, marking the one HEAD is on.
    pub fn branch_list(&mut self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        if let Head::Detached(oid) = &head {
            writeln!(
                self.writer(),
                "* {}",
                format!("(HEAD detached at {})", oid.to_short()).red()
            )?;
        }

        for branch in self.refs().list_branches()? {
            if head.branch_name() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(())
    }

    /// Create a branch at the current commit and move HEAD onto it.
    ///
    /// The workspace is untouched: the new branch points at the snapshot
    /// already checked out.
    pub fn branch_create(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;

        let source_oid = self
            .refs()
            .resolve_head()?
            .ok_or_else(|| anyhow::anyhow!("no commits yet to branch from"))?;

        self.refs().create_branch(&branch_name, &source_oid)?;

        Ok(())
    }

    pub fn branch_delete(&mut self, names: &[String]) -> anyhow::Result<()> {
        for name in names {
            let branch_name = BranchName::try_parse(name.to_string())?;
            let oid = self.refs().delete_branch(&branch_name)?;

            writeln!(
                self.writer(),
                "Deleted branch {} (was {})",
                branch_name,
                oid.to_short()
            )?;
        }

        Ok(())
    }
}
