use crate::META_DIR;
use crate::areas::index::Index;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::Error;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A repository rooted at a workspace directory.
///
/// Owns the component handles and the output writer commands print to.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    store: ObjectStore,
    refs: Refs,
    workspace: Workspace,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open a repository rooted exactly at `path`, creating the directory if
    /// needed. Used by `init`; nothing is checked or written here.
    pub fn new(path: &str, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = PathBuf::from(path);
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("failed to create directory {:?}", path))?;
        }

        let root = std::fs::canonicalize(&path)
            .with_context(|| format!("failed to resolve path {:?}", path))?;

        Ok(Self::at_root(root, writer))
    }

    /// Find the repository containing `path` by walking up the directory
    /// tree looking for the metadata directory.
    pub fn discover(path: &str, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let start = std::fs::canonicalize(path)
            .with_context(|| format!("failed to resolve path {:?}", path))?;

        let mut current = Some(start.as_path());
        while let Some(dir) = current {
            if dir.join(META_DIR).is_dir() {
                return Ok(Self::at_root(dir.to_path_buf(), writer));
            }
            current = dir.parent();
        }

        Err(Error::NoRepository(start).into())
    }

    fn at_root(root: PathBuf, writer: Box<dyn Write>) -> Self {
        let meta_path = root.join(META_DIR);

        Repository {
            store: ObjectStore::new(meta_path.join("objects").into_boxed_path()),
            refs: Refs::new(meta_path.into_boxed_path()),
            workspace: Workspace::new(root.clone().into_boxed_path()),
            path: root.into_boxed_path(),
            writer: RefCell::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta_path(&self) -> PathBuf {
        self.path.join(META_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn open_index(&self) -> Index {
        Index::new(self.meta_path().join("index").into_boxed_path())
    }
}
