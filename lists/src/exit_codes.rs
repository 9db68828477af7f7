//! Stable exit codes for `token-lists` commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/state or other errors.
pub const INVALID: i32 = 1;
/// `token-lists fetch` stored at least one fetch failure.
pub const FETCH_FAILED: i32 = 2;
/// `token-lists show` found updates waiting for `accept`.
pub const UPDATE_PENDING: i32 = 3;
