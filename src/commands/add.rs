use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    /// Stage files for the next commit.
    ///
    /// Directory arguments expand to every file beneath them. Staging stores
    /// each file's content as a blob immediately, so later edits do not
    /// affect what was staged.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.open_index();
        index.load()?;

        for path in paths {
            let file_paths = self.workspace().list_files(Some(PathBuf::from(path)))?;

            for file_path in file_paths {
                index.stage(self.workspace(), self.store(), &file_path)?;
            }
        }

        index.save()?;

        Ok(())
    }
}
