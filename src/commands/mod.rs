//! Subcommand implementations.
//!
//! Each command is generic over the [`ConfigStore`](crate::git::ConfigStore)
//! it talks to and the streams it reads and writes, so the binary wires in
//! git and the process streams while tests use in-memory doubles.

pub mod export;
pub mod import;
pub mod list;
