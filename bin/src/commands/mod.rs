//! CLI command implementations.

pub(crate) mod init_db;
pub(crate) mod run;
pub(crate) mod verify;
pub(crate) mod worker;
