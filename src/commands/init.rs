use crate::DEFAULT_BRANCH;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use std::io::Write;

impl Repository {
    /// Create the metadata layout: an empty object store, an empty index
    /// and a HEAD pointing at the unborn default branch.
    ///
    /// Re-running in an existing repository resets HEAD but touches nothing
    /// else.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let meta_path = self.meta_path();

        std::fs::create_dir_all(meta_path.join("objects"))?;
        std::fs::create_dir_all(meta_path.join("references"))?;

        self.refs().set_head(&Head::Symbolic(BranchName::try_parse(
            DEFAULT_BRANCH.to_string(),
        )?))?;

        let mut index = self.open_index();
        index.save()?;

        writeln!(
            self.writer(),
            "Initialized empty jot repository in {}",
            meta_path.display()
        )?;

        Ok(())
    }
}
