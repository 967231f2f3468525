//! The externally observable polling session.
//!
//! [`PollingSession`] is the unit the UI collaborator owns: created when
//! it begins tracking a document, released exactly once when the owning
//! context goes away. Between those points it exposes a synchronous
//! snapshot, a manual probe trigger, and a broadcast event stream.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use docpulse_core::config::PollConfig;
use docpulse_core::probe::{ProbeOutcome, Prober};
use docpulse_core::status::SessionStatus;
use docpulse_core::types::{DocumentId, Timestamp};
use serde::Serialize;

use crate::events::SessionEvent;
use crate::scheduler::{lock, run_scheduler, SchedulerContext};
use crate::state::SessionState;
use crate::timeout::run_timeout_guard;

/// Broadcast channel capacity for session events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the manual probe trigger queue. One pending trigger is
/// enough; extra requests while a forced cycle is queued are coalesced.
const MANUAL_TRIGGER_CAPACITY: usize = 1;

/// Caller misuse, rejected synchronously with no timers armed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A session cannot be started without a real document identifier.
    #[error("Cannot start a polling session without a document id")]
    MissingDocumentId,

    /// The polling configuration failed validation.
    #[error("Invalid polling configuration: {0}")]
    InvalidConfig(String),

    /// The operation was invoked on a session that has been released.
    #[error("Session has been released")]
    Released,
}

/// Read-only view of a session at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub document_id: DocumentId,
    pub status: SessionStatus,
    /// Last summary probe outcome, if any cycle has completed.
    pub summary: Option<ProbeOutcome>,
    /// Last classification probe outcome, if any cycle has completed.
    pub classification: Option<ProbeOutcome>,
    /// Most recent transient error (or the terminal timeout message).
    pub last_error: Option<String>,
    pub started_at: Timestamp,
    pub is_processing: bool,
    pub is_complete: bool,
    pub is_timed_out: bool,
}

/// A polling session tracking one document's processing status.
///
/// Dropping the session releases it, so timers cannot leak even if the
/// owner forgets to call [`release`](Self::release).
pub struct PollingSession {
    state: Arc<Mutex<SessionState>>,
    event_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
    /// Trigger for out-of-band probe cycles; `None` when the session was
    /// constructed already terminal and no scheduler is running.
    manual_tx: Option<mpsc::Sender<()>>,
}

impl PollingSession {
    /// Start tracking a document.
    ///
    /// Rejects a nil document id and invalid configurations
    /// synchronously, without arming any timer. If
    /// `config.initial_status` is already terminal the session is
    /// constructed in that state with no tasks spawned (testing/replay
    /// affordance); otherwise the scheduler performs its first probe
    /// cycle immediately and the timeout guard is armed.
    pub fn start(
        document_id: DocumentId,
        config: PollConfig,
        prober: Arc<dyn Prober>,
    ) -> Result<Self, SessionError> {
        if document_id.is_nil() {
            return Err(SessionError::MissingDocumentId);
        }
        config.validate().map_err(SessionError::InvalidConfig)?;

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = Arc::new(Mutex::new(SessionState::new(
            document_id,
            config.initial_status,
        )));
        let cancel = CancellationToken::new();

        if config.initial_status.is_terminal() {
            tracing::debug!(
                document_id = %document_id,
                status = config.initial_status.as_str(),
                "Session constructed already terminal; no timers armed",
            );
            return Ok(Self {
                state,
                event_tx,
                cancel,
                manual_tx: None,
            });
        }

        tracing::info!(
            document_id = %document_id,
            interval_ms = config.poll_interval.as_millis() as u64,
            timeout_ms = config.timeout.as_millis() as u64,
            "Starting polling session",
        );

        let (manual_tx, manual_rx) = mpsc::channel(MANUAL_TRIGGER_CAPACITY);

        let ctx = SchedulerContext {
            state: Arc::clone(&state),
            prober,
            event_tx: event_tx.clone(),
            cancel: cancel.clone(),
        };
        tokio::spawn(run_scheduler(ctx, config.poll_interval, manual_rx));

        tokio::spawn(run_timeout_guard(
            Arc::clone(&state),
            event_tx.clone(),
            cancel.clone(),
            config.timeout,
        ));

        Ok(Self {
            state,
            event_tx,
            cancel,
            manual_tx: Some(manual_tx),
        })
    }

    /// The document this session tracks.
    pub fn document_id(&self) -> DocumentId {
        lock(&self.state).document_id
    }

    /// Current status (cheaper than a full snapshot).
    pub fn status(&self) -> SessionStatus {
        lock(&self.state).status
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Read-only, non-blocking view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = lock(&self.state);
        SessionSnapshot {
            document_id: state.document_id,
            status: state.status,
            summary: state.last_summary.clone(),
            classification: state.last_classification.clone(),
            last_error: state.last_error.clone(),
            started_at: state.started_at,
            is_processing: state.status == SessionStatus::Processing,
            is_complete: state.status == SessionStatus::Complete,
            is_timed_out: state.status == SessionStatus::TimedOut,
        }
    }

    /// Request an out-of-band probe cycle (manual refresh).
    ///
    /// The cycle runs on the scheduler's own timeline, identical to a
    /// scheduled tick and subject to the same stale-response guard.
    /// Returns [`SessionError::Released`] after release; once the
    /// session is terminal the request is a harmless no-op.
    pub fn force_probe_now(&self) -> Result<(), SessionError> {
        {
            let state = lock(&self.state);
            if state.released {
                return Err(SessionError::Released);
            }
            if !state.active {
                // Terminal: the scheduler has already stopped.
                return Ok(());
            }
        }
        if let Some(tx) = &self.manual_tx {
            // A full queue means a forced cycle is already pending;
            // a closed channel means the scheduler just stopped.
            let _ = tx.try_send(());
        }
        Ok(())
    }

    /// Stop the scheduler and timeout guard unconditionally.
    ///
    /// Idempotent. Must be called when the owning context ceases to
    /// exist, regardless of status. After release, no in-flight probe
    /// response can mutate the session.
    pub fn release(&self) {
        let newly_released = {
            let mut state = lock(&self.state);
            let released = state.mark_released();
            if released {
                tracing::info!(
                    document_id = %state.document_id,
                    status = state.status.as_str(),
                    "Polling session released",
                );
            }
            released
        };

        if newly_released {
            self.cancel.cancel();
            let _ = self.event_tx.send(SessionEvent::Released);
        }
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        self.release();
    }
}
