//! Raw-code constants for the exc workspace.
//!
//! Single source of truth for the integer protocol at function boundaries:
//! `0` is success, positive values are the platform errno domain, negative
//! values are library-defined conditions. Imported by all crates — no
//! duplication permitted.

use static_assertions::const_assert;

/// Raw value reported for a successful outcome.
pub const RAW_OK: i32 = 0;

/// Raw value for a null/empty sentinel binding failure.
pub const RAW_NULL_REF: i32 = -1;

/// Raw value for a violated `ensure` check.
pub const RAW_ENSURE_VIOLATED: i32 = -2;

/// Raw value for an OS error number outside the catalogue.
pub const RAW_UNKNOWN: i32 = -3;

// Library-defined codes live below zero so they can never collide with the
// errno domain, which is strictly positive on every supported platform.
const_assert!(RAW_NULL_REF < RAW_OK);
const_assert!(RAW_ENSURE_VIOLATED < RAW_OK);
const_assert!(RAW_UNKNOWN < RAW_OK);
const_assert!(RAW_NULL_REF != RAW_ENSURE_VIOLATED);
const_assert!(RAW_NULL_REF != RAW_UNKNOWN);
const_assert!(RAW_ENSURE_VIOLATED != RAW_UNKNOWN);
