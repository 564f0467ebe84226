//! Prelude module for common re-exports.
//!
//! `use exc_common::prelude::*;` pulls in the contract surface without
//! listing individual paths.

// ─── Code Space ─────────────────────────────────────────────────────
pub use crate::code::{CodeKind, ErrorCode, Outcome, outcome_from_raw, outcome_to_raw};

// ─── Scoped Operations ──────────────────────────────────────────────
pub use crate::scope::{Flow, Scope, ScopeTrace, StepResult};

// ─── Raise Predicates ───────────────────────────────────────────────
pub use crate::raise::{check_os, ensure, ensure_or, non_null, non_null_ptr, require, some_or_os};

// ─── Release Guards ─────────────────────────────────────────────────
pub use crate::guard::{OnExit, defer};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
