//! Subcommand implementations.

pub mod init;
pub mod issues;
pub mod list_rules;
pub mod output;
