//! Session-level events emitted over a broadcast channel.
//!
//! These replace per-step console logging: the session emits a
//! structured event for every probe attempt, probe result, and status
//! transition, and any interested collaborator (UI, watcher binary,
//! tests) can subscribe without coupling the core to a logging
//! mechanism.

use serde::Serialize;

use docpulse_core::status::SessionStatus;
use docpulse_core::types::ResourceKind;

/// An observable event in the life of a polling session.
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    /// A probe cycle (scheduled or forced) began.
    ProbeCycleStarted {
        /// Scheduler generation the cycle belongs to.
        generation: u64,
    },

    /// One sub-resource probe returned.
    ProbeSettled {
        kind: ResourceKind,
        ready: bool,
        /// Transient failure reason, if the probe could not confirm
        /// readiness for a reason other than "not there yet".
        failure: Option<String>,
    },

    /// The session status changed.
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// The timeout guard fired and forced the session to `TimedOut`.
    TimedOut {
        /// Configured maximum wait, in milliseconds.
        after_ms: u64,
    },

    /// The session was released by its owner.
    Released,
}
