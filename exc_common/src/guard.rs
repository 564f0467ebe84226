//! Release-on-exit guard.
//!
//! Anything that must run when control leaves the current region — success,
//! raised code, `?` propagation, or early return — goes into an [`OnExit`]
//! guard. This replaces the convention of treating code after a block as
//! part of its finalizer: the release is attached to the acquisition, not
//! to a textual position. [`OnExit::disarm`] is the opt-out that resumes
//! normal unconditional flow.

use tracing::trace;

/// Runs its release closure when dropped.
#[must_use = "an unbound guard releases immediately"]
pub struct OnExit<F: FnOnce()> {
    release: Option<F>,
}

/// Attach `release` to the current region.
pub fn defer<F: FnOnce()>(release: F) -> OnExit<F> {
    OnExit {
        release: Some(release),
    }
}

impl<F: FnOnce()> OnExit<F> {
    /// Drop the guard without running its release.
    pub fn disarm(mut self) {
        self.release = None;
        trace!("release guard disarmed");
    }
}

impl<F: FnOnce()> Drop for OnExit<F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{ErrorCode, Outcome};
    use std::cell::Cell;

    #[test]
    fn releases_on_scope_end() {
        let released = Cell::new(false);
        {
            let _guard = defer(|| released.set(true));
            assert!(!released.get());
        }
        assert!(released.get());
    }

    #[test]
    fn releases_on_early_return() {
        fn failing_step() -> Outcome {
            Err(ErrorCode::EIO)
        }

        fn inner(released: &Cell<u32>) -> Outcome {
            let _guard = defer(|| released.set(released.get() + 1));
            failing_step()?;
            Ok(())
        }

        let released = Cell::new(0);
        assert_eq!(inner(&released), Err(ErrorCode::EIO));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn disarm_suppresses_release() {
        let released = Cell::new(false);
        {
            let guard = defer(|| released.set(true));
            guard.disarm();
        }
        assert!(!released.get());
    }

    #[test]
    fn release_runs_exactly_once() {
        let count = Cell::new(0u32);
        {
            let _guard = defer(|| count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }
}
