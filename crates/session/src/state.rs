//! Shared mutable state of a polling session.
//!
//! All mutation goes through [`SessionState::apply_merged`] and
//! [`SessionState::force_timeout`], which enforce the two safety
//! properties of the subsystem: status monotonicity (terminal states
//! never change) and the stale-response guard (a tick issued before a
//! release or a terminal transition is discarded, never applied).

use docpulse_core::merge::merge_outcomes;
use docpulse_core::probe::ProbeOutcome;
use docpulse_core::status::SessionStatus;
use docpulse_core::types::{DocumentId, Timestamp};

/// Mutable session record, held behind a mutex by the session handle
/// and its timer tasks.
#[derive(Debug)]
pub struct SessionState {
    pub document_id: DocumentId,
    pub status: SessionStatus,
    pub last_summary: Option<ProbeOutcome>,
    pub last_classification: Option<ProbeOutcome>,
    /// Most recent transient probe failure, cleared by a clean tick.
    pub last_error: Option<String>,
    pub started_at: Timestamp,
    /// Scheduler generation. Every in-flight tick carries the generation
    /// it was issued under; `release()` bumps this so late responses no
    /// longer match.
    pub generation: u64,
    /// Whether timers are armed. Cleared on release and on any terminal
    /// transition.
    pub active: bool,
    /// Whether the owner has released the session. Operations on a
    /// released session are caller misuse.
    pub released: bool,
}

/// Result of attempting to apply a finished probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickApplied {
    /// The cycle was applied; `from`/`to` describe the status transition
    /// (equal when the status did not move).
    Applied {
        from: SessionStatus,
        to: SessionStatus,
    },
    /// The cycle was stale (session released, terminal, or from an old
    /// generation) and was discarded without mutating anything.
    Discarded,
}

impl SessionState {
    /// Fresh state for a newly started session.
    pub fn new(document_id: DocumentId, initial_status: SessionStatus) -> Self {
        Self {
            document_id,
            status: initial_status,
            last_summary: None,
            last_classification: None,
            last_error: None,
            started_at: chrono::Utc::now(),
            generation: 0,
            active: !initial_status.is_terminal(),
            released: false,
        }
    }

    /// Apply the outcome of one probe cycle.
    ///
    /// Discards the cycle unless the session is still active and the
    /// cycle's generation matches the current one. On apply, both
    /// outcomes supersede the previous ones and the merged status is
    /// stored; a terminal result disarms the timers.
    pub fn apply_merged(
        &mut self,
        tick_generation: u64,
        summary: ProbeOutcome,
        classification: ProbeOutcome,
    ) -> TickApplied {
        if !self.active || self.generation != tick_generation {
            return TickApplied::Discarded;
        }

        let (new_status, transient) = merge_outcomes(self.status, &summary, &classification);
        let from = self.status;

        self.last_summary = Some(summary);
        self.last_classification = Some(classification);
        self.last_error = transient;
        self.status = new_status;

        if new_status.is_terminal() {
            self.active = false;
        }

        TickApplied::Applied {
            from,
            to: new_status,
        }
    }

    /// Force the session to `TimedOut` with the given terminal error.
    ///
    /// Returns the previous status if the transition was applied, or
    /// `None` if the session was already terminal or released (the guard
    /// firing is then a no-op).
    pub fn force_timeout(&mut self, message: &str) -> Option<SessionStatus> {
        if !self.active || self.status.is_terminal() {
            return None;
        }
        let from = self.status;
        self.status = SessionStatus::TimedOut;
        self.last_error = Some(message.to_string());
        self.active = false;
        Some(from)
    }

    /// Mark the session released: disarm timers and invalidate every
    /// in-flight tick by bumping the generation. Idempotent.
    ///
    /// Returns false if the session was already released.
    pub fn mark_released(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.active = false;
        self.generation += 1;
        true
    }
}
