#![allow(dead_code)]

pub mod command;
pub mod file;

pub const META_DIR: &str = ".vcsmeta";

/// Read the digest a branch pointer currently holds.
pub fn read_branch_digest(dir: &std::path::Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(META_DIR).join("references").join(branch))
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

/// Read the raw head file.
pub fn read_head(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(META_DIR).join("head"))
        .expect("Failed to read head file")
        .trim()
        .to_string()
}
