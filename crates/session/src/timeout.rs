//! The one-shot timeout guard task.
//!
//! Armed when the session starts, independent of the scheduler. If the
//! session is still `Processing` when the maximum wait elapses, the
//! guard forces it to `TimedOut` and cancels the shared token so the
//! scheduler stops too. If the session already finished, the firing is
//! a no-op.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::events::SessionEvent;
use crate::scheduler::lock;
use crate::state::SessionState;

/// Terminal error attached when the guard fires.
pub const TIMEOUT_MESSAGE: &str = "Processing exceeded the maximum allowed duration";

/// Wait out the maximum duration, then force a timeout if the session
/// has not completed.
pub(crate) async fn run_timeout_guard(
    state: Arc<Mutex<SessionState>>,
    event_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
    timeout: Duration,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!("Timeout guard cancelled");
            return;
        }
        _ = tokio::time::sleep(timeout) => {}
    }

    let fired = {
        let mut state = lock(&state);
        let document_id = state.document_id;
        match state.force_timeout(TIMEOUT_MESSAGE) {
            Some(from) => {
                tracing::warn!(
                    document_id = %document_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "Polling timed out",
                );
                Some(from)
            }
            None => None,
        }
    };

    if let Some(from) = fired {
        let _ = event_tx.send(SessionEvent::StatusChanged {
            from,
            to: docpulse_core::status::SessionStatus::TimedOut,
        });
        let _ = event_tx.send(SessionEvent::TimedOut {
            after_ms: timeout.as_millis() as u64,
        });
    }

    // Stop the scheduler whether or not the transition applied; if the
    // session already finished, the token is cancelled already and this
    // is harmless.
    cancel.cancel();
}
