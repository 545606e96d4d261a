//! git-konfig library
//!
//! This module exports the core components for testing and integration.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod git;
pub mod logging;
