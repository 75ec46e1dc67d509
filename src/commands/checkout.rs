use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Resolved;
use crate::artifacts::checkout::Checkout;
use std::io::Write;

impl Repository {
    /// Switch the workspace to another branch or commit.
    ///
    /// With `create`, a new branch is made at the current commit instead;
    /// the workspace already matches it, so nothing is rewritten.
    pub fn checkout(&mut self, target: &str, create: bool) -> anyhow::Result<()> {
        if create {
            self.branch_create(target)?;
            writeln!(self.writer(), "Switched to a new branch '{}'", target)?;
            return Ok(());
        }

        let resolved = Checkout::new(self).run(target)?;

        match resolved {
            Resolved::Branch(name, _) => {
                writeln!(self.writer(), "Switched to branch '{}'", name)?;
            }
            Resolved::Detached(oid) => {
                writeln!(
                    self.writer(),
                    "Note: switching to '{}' leaves HEAD detached at {}",
                    target,
                    oid.to_short()
                )?;
            }
        }

        Ok(())
    }
}
