//! Raise predicates: sentinel and side-channel checks as plain `Result`
//! composition.
//!
//! These are thin derivations over [`ErrorCode`], meant for `?` at call
//! sites — wrapping calls that signal failure through an empty sentinel, a
//! false condition, or the thread errno rather than a return value.

use crate::code::{ErrorCode, Outcome};
use std::ptr::NonNull;

/// Raise `code` if `value` is the empty sentinel.
#[inline]
pub fn require<T>(value: Option<T>, code: ErrorCode) -> Result<T, ErrorCode> {
    value.ok_or(code)
}

/// Raise [`ErrorCode::NullRef`] if `value` is the empty sentinel.
#[inline]
pub fn non_null<T>(value: Option<T>) -> Result<T, ErrorCode> {
    value.ok_or(ErrorCode::NullRef)
}

/// Raw-pointer form of [`non_null`], for FFI call sites returning null on
/// failure.
#[inline]
pub fn non_null_ptr<T>(ptr: *mut T) -> Result<NonNull<T>, ErrorCode> {
    NonNull::new(ptr).ok_or(ErrorCode::NullRef)
}

/// Raise [`ErrorCode::EnsureViolated`] if `cond` is false.
#[inline]
pub fn ensure(cond: bool) -> Outcome {
    ensure_or(cond, ErrorCode::EnsureViolated)
}

/// Raise `code` if `cond` is false.
#[inline]
pub fn ensure_or(cond: bool, code: ErrorCode) -> Outcome {
    if cond { Ok(()) } else { Err(code) }
}

/// Raise the calling thread's current errno if `failed` holds.
///
/// For wrapping calls whose failure is signaled via the errno side channel
/// rather than a return value.
#[inline]
pub fn check_os(failed: bool) -> Outcome {
    if failed {
        Err(ErrorCode::last_os())
    } else {
        Ok(())
    }
}

/// Unwrap a sentinel-returning, errno-setting call: the empty sentinel
/// raises the captured platform code.
#[inline]
pub fn some_or_os<T>(value: Option<T>) -> Result<T, ErrorCode> {
    value.ok_or_else(ErrorCode::last_os)
}
