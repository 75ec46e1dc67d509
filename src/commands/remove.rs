use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Unstage paths. Paths not currently staged are silently skipped;
    /// workspace files and stored blobs are left alone.
    pub fn remove(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.open_index();
        index.load()?;

        for path in paths {
            index.unstage(Path::new(path));
        }

        index.save()?;

        Ok(())
    }
}
