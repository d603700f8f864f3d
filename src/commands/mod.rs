//! Subcommand implementations.

pub mod init;
pub mod interactive;
pub mod search;
pub mod serve;
