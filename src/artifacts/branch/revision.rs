//! Revision resolution
//!
//! A revision string names a commit. Branch names win over digests: a
//! revision is first tried as a branch, then as a full 40-character digest,
//! then as an abbreviated digest prefix. `HEAD` (or its alias `@`) names
//! whatever is currently checked out.

use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::DIGEST_HEX_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Error;

const MIN_ABBREV_LENGTH: usize = 4;

/// A revision string as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

/// Where a resolved revision landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The revision named a branch.
    Branch(BranchName, ObjectId),
    /// The revision named a commit directly.
    Detached(ObjectId),
}

impl Resolved {
    pub fn oid(&self) -> &ObjectId {
        match self {
            Resolved::Branch(_, oid) => oid,
            Resolved::Detached(oid) => oid,
        }
    }
}

impl Revision {
    pub fn parse(revision: &str) -> Self {
        let revision = REF_ALIASES.get(revision).copied().unwrap_or(revision);
        Revision(revision.to_string())
    }

    /// Resolve to a commit, validating that the target object is one.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Resolved> {
        if self.0 == "HEAD" {
            return self.resolve_head(repository);
        }

        if let Ok(name) = BranchName::try_parse(self.0.clone())
            && let Some(oid) = repository.refs().read_branch(&name)?
        {
            return Ok(Resolved::Branch(name, oid));
        }

        if self.0.len() == DIGEST_HEX_LENGTH {
            let oid = ObjectId::try_parse(self.0.clone())?;
            self.ensure_commit(repository, &oid)?;
            return Ok(Resolved::Detached(oid));
        }

        if self.looks_like_abbreviated_digest() {
            return self.resolve_abbreviated(repository);
        }

        Err(Error::NoBranchExists(self.0.clone()).into())
    }

    fn resolve_head(&self, repository: &Repository) -> anyhow::Result<Resolved> {
        match repository.refs().read_head()? {
            Head::Symbolic(name) => match repository.refs().read_branch(&name)? {
                Some(oid) => Ok(Resolved::Branch(name, oid)),
                None => anyhow::bail!("branch {} has no commits yet", name),
            },
            Head::Detached(oid) => Ok(Resolved::Detached(oid)),
        }
    }

    fn looks_like_abbreviated_digest(&self) -> bool {
        self.0.len() >= MIN_ABBREV_LENGTH
            && self.0.len() < DIGEST_HEX_LENGTH
            && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn resolve_abbreviated(&self, repository: &Repository) -> anyhow::Result<Resolved> {
        let prefix = self.0.to_ascii_lowercase();
        let mut candidates = repository.store().find_objects_by_prefix(&prefix)?;
        candidates.retain(|oid| {
            matches!(
                repository.store().object_type_of(oid),
                Ok(ObjectType::Commit)
            )
        });

        match candidates.len() {
            0 => anyhow::bail!("revision {} does not match any commit", self.0),
            1 => Ok(Resolved::Detached(candidates.remove(0))),
            _ => anyhow::bail!(
                "revision {} is ambiguous ({} matching commits)",
                self.0,
                candidates.len()
            ),
        }
    }

    fn ensure_commit(&self, repository: &Repository, oid: &ObjectId) -> anyhow::Result<()> {
        match repository.store().object_type_of(oid)? {
            ObjectType::Commit => Ok(()),
            other => anyhow::bail!("object {} is a {}, not a commit", oid, other),
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
