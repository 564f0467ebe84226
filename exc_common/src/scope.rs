//! Scoped operation block: try/catch/finally over [`Outcome`] values.
//!
//! A [`Scope`] is one unit of execution with an associated current error
//! code. It binds local resources, runs its normal-path body only if
//! binding succeeded, runs at most one matching handler if binding or the
//! body raised a code, and unconditionally runs its finalizer. The scope's
//! outcome then feeds the enclosing scope (or the function boundary)
//! through ordinary `?` composition.
//!
//! ## Phase order
//!
//! `Entering → Bound|BindFailed → (Running → Completed|Raised) → Handling
//! → Finalizing → Exited`.
//!
//! - A failed binding step skips the body entirely; the normal path never
//!   runs against partially-bound state.
//! - [`Flow::Exit`] from the binding step or the body bypasses all handler
//!   matching, runs the finalizer, and re-emerges as `Ok(())` — a
//!   same-scope early exit is not an error and is structurally invisible
//!   to handlers.
//! - A raised code matches the first `.catch` clause with the same code,
//!   else the `.catch_any` clause if present, else it propagates unchanged
//!   as `Err(code)`.
//! - A handler that completes with [`Flow::Done`] recovers the scope. A
//!   handler that returns `Err` (throw or re-raise) fixes that code as the
//!   scope's outcome without re-entering this scope's handlers.
//! - The finalizer runs exactly once on every path and cannot raise. It
//!   sees whatever partial resource state the binding step established, so
//!   cleanup conditions itself on what was actually acquired (`Option`
//!   slots in the caller's state take the place of null checks).
//!
//! Execution is deferred: the builder collects the steps and [`Scope::finally`]
//! runs the whole block. A scope without `finally` never executes, so
//! finalization-always-runs holds by construction.

use crate::code::{ErrorCode, Outcome};
use bitflags::bitflags;
use tracing::{debug, trace};

/// Result of a step that did not raise: continue normally, or leave the
/// scope early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Normal completion; the next phase proceeds.
    Done,
    /// Non-local exit from the current scope. Bypasses handler matching,
    /// still finalizes, and is not an error at the scope boundary.
    Exit,
}

/// What binding steps, bodies, and handlers return.
///
/// `?` works on any `Result<_, ErrorCode>` inside a step, including the
/// [`Outcome`] of a nested scope — that is the propagation rule.
pub type StepResult = Result<Flow, ErrorCode>;

bitflags! {
    /// Which phases of a scope actually executed.
    ///
    /// Optional observer wired in with [`Scope::trace`]; written once when
    /// the scope exits. Used by tests and diagnostics to assert the path
    /// taken.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScopeTrace: u8 {
        /// The binding step completed.
        const BOUND       = 0x01;
        /// The binding step raised; the body was skipped.
        const BIND_FAILED = 0x02;
        /// The normal-path body ran.
        const BODY        = 0x04;
        /// A handler clause (exact or wildcard) ran.
        const HANDLED     = 0x08;
        /// A handler threw or re-raised.
        const RETHREW     = 0x10;
        /// The scope left through [`Flow::Exit`].
        const EARLY_EXIT  = 0x20;
        /// The finalizer ran.
        const FINALIZED   = 0x40;
    }
}

impl Default for ScopeTrace {
    fn default() -> Self {
        Self::empty()
    }
}

type Step<'a, S> = Box<dyn FnOnce(&mut S) -> StepResult + 'a>;
type Handler<'a, S> = Box<dyn FnOnce(&mut S, ErrorCode) -> StepResult + 'a>;

/// Builder for one scoped operation over caller-owned state `S`.
///
/// `S` holds the resource slots the binding step fills. The scope borrows
/// it for its own lifetime and hands it to every step, so the finalizer
/// releases exactly what was acquired.
///
/// ```
/// use exc_common::code::ErrorCode;
/// use exc_common::scope::{Flow, Scope};
///
/// #[derive(Default)]
/// struct Held {
///     buf: Option<Vec<u8>>,
/// }
///
/// let mut held = Held::default();
/// let outcome = Scope::named("alloc", &mut held)
///     .bind(|st| {
///         st.buf = Some(vec![0u8; 64]);
///         Ok(Flow::Done)
///     })
///     .run(|_st| Err(ErrorCode::EIO))
///     .catch(ErrorCode::EIO, |_st, _code| Ok(Flow::Done))
///     .finally(|st| {
///         st.buf = None;
///     });
///
/// assert!(outcome.is_ok());
/// assert!(held.buf.is_none());
/// ```
pub struct Scope<'a, S> {
    name: &'static str,
    state: &'a mut S,
    bind: Option<Step<'a, S>>,
    body: Option<Step<'a, S>>,
    handlers: Vec<(ErrorCode, Handler<'a, S>)>,
    fallback: Option<Handler<'a, S>>,
    observer: Option<&'a mut ScopeTrace>,
}

impl<'a, S> Scope<'a, S> {
    /// Open an unnamed scope over `state`.
    pub fn new(state: &'a mut S) -> Self {
        Self::named("unnamed", state)
    }

    /// Open a scope whose name appears in tracing events.
    pub fn named(name: &'static str, state: &'a mut S) -> Self {
        Self {
            name,
            state,
            bind: None,
            body: None,
            handlers: Vec::new(),
            fallback: None,
            observer: None,
        }
    }

    /// Set the binding step: resource acquisition that either fills slots
    /// in `S` or raises. Raising here skips the body.
    pub fn bind(mut self, step: impl FnOnce(&mut S) -> StepResult + 'a) -> Self {
        self.bind = Some(Box::new(step));
        self
    }

    /// Set the normal-path body. Runs only if binding fully succeeded.
    pub fn run(mut self, step: impl FnOnce(&mut S) -> StepResult + 'a) -> Self {
        self.body = Some(Box::new(step));
        self
    }

    /// Add a handler clause for `code`. Clauses are consulted in the order
    /// they were added; the first clause with a matching code wins. The
    /// handler receives the caught code so it can re-raise it verbatim.
    pub fn catch(
        mut self,
        code: ErrorCode,
        handler: impl FnOnce(&mut S, ErrorCode) -> StepResult + 'a,
    ) -> Self {
        self.handlers.push((code, Box::new(handler)));
        self
    }

    /// Add the wildcard clause, consulted when no exact clause matched.
    pub fn catch_any(mut self, handler: impl FnOnce(&mut S, ErrorCode) -> StepResult + 'a) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Record the executed phases into `observer` when the scope exits.
    pub fn trace(mut self, observer: &'a mut ScopeTrace) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Terminate the block: execute binding, body, handler dispatch, and
    /// `finalizer`, in that order, and report the scope's outcome.
    ///
    /// The finalizer runs exactly once whichever path was taken and must
    /// not raise (its signature is infallible).
    pub fn finally(mut self, finalizer: impl FnOnce(&mut S)) -> Outcome {
        let mut phases = ScopeTrace::empty();

        let step = match self.bind.take() {
            Some(bind) => bind(self.state),
            None => Ok(Flow::Done),
        };

        let step = match step {
            Ok(Flow::Done) => {
                phases.insert(ScopeTrace::BOUND);
                match self.body.take() {
                    Some(body) => {
                        phases.insert(ScopeTrace::BODY);
                        body(self.state)
                    }
                    None => Ok(Flow::Done),
                }
            }
            Ok(Flow::Exit) => Ok(Flow::Exit),
            Err(code) => {
                phases.insert(ScopeTrace::BIND_FAILED);
                debug!(scope = self.name, code = code.name(), "binding step raised");
                Err(code)
            }
        };

        let outcome = match step {
            Ok(Flow::Done) => Ok(()),
            Ok(Flow::Exit) => {
                phases.insert(ScopeTrace::EARLY_EXIT);
                trace!(scope = self.name, "early exit");
                Ok(())
            }
            Err(code) => self.dispatch(code, &mut phases),
        };

        finalizer(self.state);
        phases.insert(ScopeTrace::FINALIZED);
        trace!(scope = self.name, "finalized");

        if let Some(observer) = self.observer {
            *observer = phases;
        }
        outcome
    }

    /// Run at most one handler for `code`, or propagate it unchanged.
    fn dispatch(&mut self, code: ErrorCode, phases: &mut ScopeTrace) -> Outcome {
        let exact = self.handlers.iter().position(|(c, _)| *c == code);
        let handler = match exact {
            Some(i) => Some(self.handlers.remove(i).1),
            None => self.fallback.take(),
        };

        let Some(handler) = handler else {
            debug!(
                scope = self.name,
                code = code.name(),
                "unhandled, propagating to enclosing scope"
            );
            return Err(code);
        };

        phases.insert(ScopeTrace::HANDLED);
        trace!(
            scope = self.name,
            code = code.name(),
            exact = exact.is_some(),
            "handler matched"
        );

        // A handler's own raise never re-enters this scope's dispatch.
        match handler(self.state, code) {
            Ok(Flow::Done) => Ok(()),
            Ok(Flow::Exit) => {
                phases.insert(ScopeTrace::EARLY_EXIT);
                trace!(scope = self.name, "early exit from handler");
                Ok(())
            }
            Err(next) => {
                phases.insert(ScopeTrace::RETHREW);
                debug!(
                    scope = self.name,
                    caught = code.name(),
                    raised = next.name(),
                    "handler rethrew"
                );
                Err(next)
            }
        }
    }
}
