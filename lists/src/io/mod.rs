//! I/O helpers for token list commands.

pub mod config;
pub mod init;
pub mod source;
pub mod state_store;
