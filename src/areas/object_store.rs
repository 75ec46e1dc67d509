use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{digest_of, Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

/// Content-addressable object storage.
///
/// Objects live as `objects/<hex-digest>`, one flat file per object holding
/// the canonical bytes verbatim. Storing the same content twice is a no-op;
/// reads re-verify the digest so silent corruption never goes unnoticed.
#[derive(Debug)]
pub struct ObjectStore {
    path: Box<Path>,
}

impl ObjectStore {
    pub fn new(path: Box<Path>) -> Self {
        ObjectStore { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store canonical bytes and return their digest. Idempotent.
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        let object_id = digest_of(&content)?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, content)?;
        }

        Ok(object_id)
    }

    /// Serialize and store an object, returning its digest.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(object.serialize()?)
    }

    /// Retrieve the canonical bytes stored under a digest.
    ///
    /// Recomputes the digest over the bytes read back; a mismatch means the
    /// file was tampered with or damaged and surfaces as [`Error::CorruptObject`].
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(Error::ObjectNotFound(object_id.clone()).into());
        }

        let content = Bytes::from(std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?);

        if digest_of(&content)? != *object_id {
            return Err(Error::CorruptObject(object_id.clone()).into());
        }

        Ok(content)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, reader) = self.open_object(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(reader)?)),
            _ => Ok(None),
        }
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        let (object_type, reader) = self.open_object(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(reader)?)),
            _ => Ok(None),
        }
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, reader) = self.open_object(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(reader)?)),
            _ => Ok(None),
        }
    }

    pub fn object_type_of(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.open_object(object_id)?;
        Ok(object_type)
    }

    fn open_object(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let content = self.get(object_id)?;
        let mut reader = Cursor::new(content);

        let object_type = ObjectType::parse_header(&mut reader)?;

        Ok((object_type, reader))
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file onto the final name so readers never observe
        // a partially written object
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose digest starts with the given hex prefix.
    ///
    /// Used to resolve abbreviated digests; more than one match means the
    /// prefix is ambiguous and the caller decides what to do about it.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        if !self.path.is_dir() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name_str = file_name.to_string_lossy();

            if file_name_str.starts_with(prefix)
                && let Ok(oid) = ObjectId::try_parse(file_name_str.into_owned())
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }
}
