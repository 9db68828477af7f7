//! Deterministic, pure logic for the token list registry.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod actions;
pub mod diff;
pub mod invariants;
pub mod policy;
pub mod reducer;
pub mod types;
pub mod version;
