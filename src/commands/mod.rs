//! Porcelain commands, one per file, each extending [`Repository`]
//!
//! [`Repository`]: crate::areas::repository::Repository

mod add;
mod branch;
mod checkout;
mod commit;
mod init;
mod log;
mod remove;
