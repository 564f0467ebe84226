//! Error code catalogue mirroring the POSIX errno domain.
//!
//! `ErrorCode` classifies the outcome of a failed operation: one variant per
//! recognized OS error condition plus the library-defined conditions
//! (`NullRef`, `EnsureViolated`). Success is not a code — fallible
//! operations return [`Outcome`] (`Result<(), ErrorCode>`), so call sites
//! compose purely through return values.
//!
//! Raw values come from `libc`, never hardcoded, so the catalogue stays
//! correct across platforms. Library-defined conditions use the negative
//! constants from [`crate::consts`] and can never collide with errno.
//!
//! ## Aliasing policy
//!
//! Where the platform maps two errno names to one value (`EWOULDBLOCK` ==
//! `EAGAIN`, and on Linux `EOPNOTSUPP` == `ENOTSUP`), the catalogue carries
//! exactly one variant for that value. Codes are structurally distinct enum
//! variants — a handler written for one code can never silently catch
//! another.

use crate::consts::{RAW_ENSURE_VIOLATED, RAW_NULL_REF, RAW_OK, RAW_UNKNOWN};
use nix::errno::Errno;
use thiserror::Error;

/// Outcome of a completed scope or a function using the contract.
///
/// `Ok(())` is the success value; there is no "no error" code.
pub type Outcome = Result<(), ErrorCode>;

/// Broad classification of an error code (platform vs. library condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Maps 1:1 to an OS errno-style code.
    Platform,
    /// Library-defined condition (failed check, null binding).
    Logic,
}

/// Symbolic classification of a failed operation's outcome.
///
/// Totally ordered and hashable so it can drive any dispatch construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[non_exhaustive]
pub enum ErrorCode {
    #[error("operation not permitted")]
    EPERM,
    #[error("no such file or directory")]
    ENOENT,
    #[error("no such process")]
    ESRCH,
    #[error("interrupted system call")]
    EINTR,
    #[error("input/output error")]
    EIO,
    #[error("no such device or address")]
    ENXIO,
    #[error("argument list too long")]
    E2BIG,
    #[error("exec format error")]
    ENOEXEC,
    #[error("bad file descriptor")]
    EBADF,
    #[error("no child processes")]
    ECHILD,
    /// Also covers `EWOULDBLOCK`, which aliases `EAGAIN` on all supported
    /// platforms.
    #[error("resource temporarily unavailable")]
    EAGAIN,
    #[error("cannot allocate memory")]
    ENOMEM,
    #[error("permission denied")]
    EACCES,
    #[error("bad address")]
    EFAULT,
    #[error("block device required")]
    ENOTBLK,
    #[error("device or resource busy")]
    EBUSY,
    #[error("file exists")]
    EEXIST,
    #[error("invalid cross-device link")]
    EXDEV,
    #[error("no such device")]
    ENODEV,
    #[error("not a directory")]
    ENOTDIR,
    #[error("is a directory")]
    EISDIR,
    #[error("invalid argument")]
    EINVAL,
    #[error("too many open files in system")]
    ENFILE,
    #[error("too many open files")]
    EMFILE,
    #[error("inappropriate ioctl for device")]
    ENOTTY,
    #[error("text file busy")]
    ETXTBSY,
    #[error("file too large")]
    EFBIG,
    #[error("no space left on device")]
    ENOSPC,
    #[error("illegal seek")]
    ESPIPE,
    #[error("read-only file system")]
    EROFS,
    #[error("too many links")]
    EMLINK,
    #[error("broken pipe")]
    EPIPE,
    #[error("numerical argument out of domain")]
    EDOM,
    #[error("numerical result out of range")]
    ERANGE,
    #[error("resource deadlock avoided")]
    EDEADLK,
    #[error("file name too long")]
    ENAMETOOLONG,
    #[error("no locks available")]
    ENOLCK,
    #[error("function not implemented")]
    ENOSYS,
    #[error("directory not empty")]
    ENOTEMPTY,
    #[error("too many levels of symbolic links")]
    ELOOP,
    #[error("value too large for defined data type")]
    EOVERFLOW,
    #[error("connection timed out")]
    ETIMEDOUT,
    #[error("operation canceled")]
    ECANCELED,
    /// Also covers `EOPNOTSUPP`, which aliases `ENOTSUP` on Linux.
    #[error("operation not supported")]
    ENOTSUP,
    #[error("address already in use")]
    EADDRINUSE,
    #[error("connection refused")]
    ECONNREFUSED,
    #[error("connection reset by peer")]
    ECONNRESET,
    /// A binding step produced the null/empty sentinel.
    #[error("null reference")]
    NullRef,
    /// An `ensure` check evaluated to false.
    #[error("ensure check violated")]
    EnsureViolated,
    /// An OS error number outside the catalogue.
    #[error("unknown error code")]
    Unknown,
}

impl ErrorCode {
    /// Map a raw boundary value to a code. Total: unmapped values become
    /// [`ErrorCode::Unknown`].
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            libc::EPERM => Self::EPERM,
            libc::ENOENT => Self::ENOENT,
            libc::ESRCH => Self::ESRCH,
            libc::EINTR => Self::EINTR,
            libc::EIO => Self::EIO,
            libc::ENXIO => Self::ENXIO,
            libc::E2BIG => Self::E2BIG,
            libc::ENOEXEC => Self::ENOEXEC,
            libc::EBADF => Self::EBADF,
            libc::ECHILD => Self::ECHILD,
            libc::EAGAIN => Self::EAGAIN,
            libc::ENOMEM => Self::ENOMEM,
            libc::EACCES => Self::EACCES,
            libc::EFAULT => Self::EFAULT,
            libc::ENOTBLK => Self::ENOTBLK,
            libc::EBUSY => Self::EBUSY,
            libc::EEXIST => Self::EEXIST,
            libc::EXDEV => Self::EXDEV,
            libc::ENODEV => Self::ENODEV,
            libc::ENOTDIR => Self::ENOTDIR,
            libc::EISDIR => Self::EISDIR,
            libc::EINVAL => Self::EINVAL,
            libc::ENFILE => Self::ENFILE,
            libc::EMFILE => Self::EMFILE,
            libc::ENOTTY => Self::ENOTTY,
            libc::ETXTBSY => Self::ETXTBSY,
            libc::EFBIG => Self::EFBIG,
            libc::ENOSPC => Self::ENOSPC,
            libc::ESPIPE => Self::ESPIPE,
            libc::EROFS => Self::EROFS,
            libc::EMLINK => Self::EMLINK,
            libc::EPIPE => Self::EPIPE,
            libc::EDOM => Self::EDOM,
            libc::ERANGE => Self::ERANGE,
            libc::EDEADLK => Self::EDEADLK,
            libc::ENAMETOOLONG => Self::ENAMETOOLONG,
            libc::ENOLCK => Self::ENOLCK,
            libc::ENOSYS => Self::ENOSYS,
            libc::ENOTEMPTY => Self::ENOTEMPTY,
            libc::ELOOP => Self::ELOOP,
            libc::EOVERFLOW => Self::EOVERFLOW,
            libc::ETIMEDOUT => Self::ETIMEDOUT,
            libc::ECANCELED => Self::ECANCELED,
            libc::ENOTSUP => Self::ENOTSUP,
            libc::EADDRINUSE => Self::EADDRINUSE,
            libc::ECONNREFUSED => Self::ECONNREFUSED,
            libc::ECONNRESET => Self::ECONNRESET,
            RAW_NULL_REF => Self::NullRef,
            RAW_ENSURE_VIOLATED => Self::EnsureViolated,
            _ => Self::Unknown,
        }
    }

    /// Raw boundary value for this code (errno value, or a negative
    /// library-defined constant).
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::EPERM => libc::EPERM,
            Self::ENOENT => libc::ENOENT,
            Self::ESRCH => libc::ESRCH,
            Self::EINTR => libc::EINTR,
            Self::EIO => libc::EIO,
            Self::ENXIO => libc::ENXIO,
            Self::E2BIG => libc::E2BIG,
            Self::ENOEXEC => libc::ENOEXEC,
            Self::EBADF => libc::EBADF,
            Self::ECHILD => libc::ECHILD,
            Self::EAGAIN => libc::EAGAIN,
            Self::ENOMEM => libc::ENOMEM,
            Self::EACCES => libc::EACCES,
            Self::EFAULT => libc::EFAULT,
            Self::ENOTBLK => libc::ENOTBLK,
            Self::EBUSY => libc::EBUSY,
            Self::EEXIST => libc::EEXIST,
            Self::EXDEV => libc::EXDEV,
            Self::ENODEV => libc::ENODEV,
            Self::ENOTDIR => libc::ENOTDIR,
            Self::EISDIR => libc::EISDIR,
            Self::EINVAL => libc::EINVAL,
            Self::ENFILE => libc::ENFILE,
            Self::EMFILE => libc::EMFILE,
            Self::ENOTTY => libc::ENOTTY,
            Self::ETXTBSY => libc::ETXTBSY,
            Self::EFBIG => libc::EFBIG,
            Self::ENOSPC => libc::ENOSPC,
            Self::ESPIPE => libc::ESPIPE,
            Self::EROFS => libc::EROFS,
            Self::EMLINK => libc::EMLINK,
            Self::EPIPE => libc::EPIPE,
            Self::EDOM => libc::EDOM,
            Self::ERANGE => libc::ERANGE,
            Self::EDEADLK => libc::EDEADLK,
            Self::ENAMETOOLONG => libc::ENAMETOOLONG,
            Self::ENOLCK => libc::ENOLCK,
            Self::ENOSYS => libc::ENOSYS,
            Self::ENOTEMPTY => libc::ENOTEMPTY,
            Self::ELOOP => libc::ELOOP,
            Self::EOVERFLOW => libc::EOVERFLOW,
            Self::ETIMEDOUT => libc::ETIMEDOUT,
            Self::ECANCELED => libc::ECANCELED,
            Self::ENOTSUP => libc::ENOTSUP,
            Self::EADDRINUSE => libc::EADDRINUSE,
            Self::ECONNREFUSED => libc::ECONNREFUSED,
            Self::ECONNRESET => libc::ECONNRESET,
            Self::NullRef => RAW_NULL_REF,
            Self::EnsureViolated => RAW_ENSURE_VIOLATED,
            Self::Unknown => RAW_UNKNOWN,
        }
    }

    /// Symbolic name for logs and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EPERM => "EPERM",
            Self::ENOENT => "ENOENT",
            Self::ESRCH => "ESRCH",
            Self::EINTR => "EINTR",
            Self::EIO => "EIO",
            Self::ENXIO => "ENXIO",
            Self::E2BIG => "E2BIG",
            Self::ENOEXEC => "ENOEXEC",
            Self::EBADF => "EBADF",
            Self::ECHILD => "ECHILD",
            Self::EAGAIN => "EAGAIN",
            Self::ENOMEM => "ENOMEM",
            Self::EACCES => "EACCES",
            Self::EFAULT => "EFAULT",
            Self::ENOTBLK => "ENOTBLK",
            Self::EBUSY => "EBUSY",
            Self::EEXIST => "EEXIST",
            Self::EXDEV => "EXDEV",
            Self::ENODEV => "ENODEV",
            Self::ENOTDIR => "ENOTDIR",
            Self::EISDIR => "EISDIR",
            Self::EINVAL => "EINVAL",
            Self::ENFILE => "ENFILE",
            Self::EMFILE => "EMFILE",
            Self::ENOTTY => "ENOTTY",
            Self::ETXTBSY => "ETXTBSY",
            Self::EFBIG => "EFBIG",
            Self::ENOSPC => "ENOSPC",
            Self::ESPIPE => "ESPIPE",
            Self::EROFS => "EROFS",
            Self::EMLINK => "EMLINK",
            Self::EPIPE => "EPIPE",
            Self::EDOM => "EDOM",
            Self::ERANGE => "ERANGE",
            Self::EDEADLK => "EDEADLK",
            Self::ENAMETOOLONG => "ENAMETOOLONG",
            Self::ENOLCK => "ENOLCK",
            Self::ENOSYS => "ENOSYS",
            Self::ENOTEMPTY => "ENOTEMPTY",
            Self::ELOOP => "ELOOP",
            Self::EOVERFLOW => "EOVERFLOW",
            Self::ETIMEDOUT => "ETIMEDOUT",
            Self::ECANCELED => "ECANCELED",
            Self::ENOTSUP => "ENOTSUP",
            Self::EADDRINUSE => "EADDRINUSE",
            Self::ECONNREFUSED => "ECONNREFUSED",
            Self::ECONNRESET => "ECONNRESET",
            Self::NullRef => "NullRef",
            Self::EnsureViolated => "EnsureViolated",
            Self::Unknown => "Unknown",
        }
    }

    /// Broad classification: platform errno domain vs. library condition.
    #[inline]
    pub const fn kind(self) -> CodeKind {
        match self {
            Self::NullRef | Self::EnsureViolated => CodeKind::Logic,
            _ => CodeKind::Platform,
        }
    }

    /// Capture the calling thread's current errno as a code.
    #[inline]
    pub fn last_os() -> Self {
        Self::from_raw(Errno::last_raw())
    }

    /// Map an I/O error to a code via its OS error number.
    ///
    /// Synthetic I/O errors without an OS number become
    /// [`ErrorCode::Unknown`].
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(raw) => Self::from_raw(raw),
            None => Self::Unknown,
        }
    }
}

impl From<Errno> for ErrorCode {
    fn from(errno: Errno) -> Self {
        Self::from_raw(errno as i32)
    }
}

impl From<std::io::Error> for ErrorCode {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(&err)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.to_raw()
    }
}

/// Raw boundary value of an outcome (`0` on success).
#[inline]
pub const fn outcome_to_raw(outcome: Outcome) -> i32 {
    match outcome {
        Ok(()) => RAW_OK,
        Err(code) => code.to_raw(),
    }
}

/// Rebuild an outcome from a raw boundary value.
#[inline]
pub const fn outcome_from_raw(raw: i32) -> Outcome {
    if raw == RAW_OK {
        Ok(())
    } else {
        Err(ErrorCode::from_raw(raw))
    }
}
