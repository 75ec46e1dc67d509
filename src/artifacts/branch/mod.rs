//! Branch names and revision resolution

pub mod branch_name;
pub mod revision;

use phf::phf_map;

/// Patterns a branch name must not match, mirroring git's ref name rules:
/// no leading dot or slash, no `..`, no `/.`, no trailing slash or `.lock`,
/// no `@{`, and no control or glob characters.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Shorthand revision spellings and what they resolve to.
pub static REF_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "@" => "HEAD",
};
