//! exc Common Library
//!
//! Error-propagation contract for the exc workspace: an errno-mirroring
//! code catalogue, scoped try/catch/finally operation blocks with
//! guaranteed finalization, raise predicates for sentinel and errno
//! side-channel failures, and release-on-exit guards.
//!
//! # Module Structure
//!
//! - [`code`] - Error code catalogue and raw-value conversions
//! - [`scope`] - Scoped operation blocks (bind / run / catch / finally)
//! - [`raise`] - Raise predicates (`ensure`, `non_null`, errno capture)
//! - [`guard`] - Release-on-exit guards
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Raw-code boundary constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! exc = { package = "exc_common", path = "../exc_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use exc::prelude::*;
//! # use exc_common as exc;
//! ```

pub mod code;
pub mod config;
pub mod consts;
pub mod guard;
pub mod prelude;
pub mod raise;
pub mod scope;
