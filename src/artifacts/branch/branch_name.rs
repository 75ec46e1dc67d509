use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::Error;
use std::path::PathBuf;

/// A validated branch name.
///
/// Names may be hierarchical (`feature/login`); each path segment becomes a
/// directory level under `references/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() || !Self::is_valid(&name)? {
            return Err(Error::InvalidBranchName(name).into());
        }

        Ok(BranchName(name))
    }

    fn is_valid(name: &str) -> anyhow::Result<bool> {
        let invalid = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)?;
        Ok(!invalid.is_match(name))
    }

    /// Relative path of this branch's pointer file under `references/`.
    pub fn as_ref_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
