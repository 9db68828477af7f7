//! Registry of externally hosted token lists.
//!
//! Each list URL maps to an entry that tracks its fetch lifecycle, the
//! accepted list content, and any newer version awaiting acceptance. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (actions, reducer, version rules).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config and state files, list sources).
//!
//! [`store`] and [`fetch`] coordinate core logic with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod fetch;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
