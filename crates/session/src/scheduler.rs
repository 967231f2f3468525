//! The repeating poll scheduler task.
//!
//! One task per session: a [`tokio::time::interval`] whose first tick
//! completes immediately (probe at t=0, not after the first interval),
//! plus an mpsc trigger so `force_probe_now` runs on the same timeline
//! as scheduled ticks. Ticks are therefore strictly sequential; if a
//! tick runs longer than the interval the next one fires back-to-back,
//! which is fine because probes are idempotent reads.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use docpulse_core::probe::Prober;
use docpulse_core::status::SessionStatus;
use docpulse_core::types::ResourceKind;

use crate::events::SessionEvent;
use crate::state::{SessionState, TickApplied};

/// Everything a scheduler task needs to run probe cycles.
pub(crate) struct SchedulerContext {
    pub state: Arc<Mutex<SessionState>>,
    pub prober: Arc<dyn Prober>,
    pub event_tx: broadcast::Sender<SessionEvent>,
    pub cancel: CancellationToken,
}

/// Run the poll loop until cancellation or a terminal status.
///
/// On a terminal merge result the scheduler stops itself within the
/// same tick and cancels the shared token, which also stops the
/// timeout guard.
pub(crate) async fn run_scheduler(
    ctx: SchedulerContext,
    poll_interval: std::time::Duration,
    mut manual_rx: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            _ = ctx.cancel.cancelled() => {
                tracing::debug!("Poll scheduler cancelled");
                return;
            }
            _ = ticker.tick() => {}
            Some(()) = manual_rx.recv() => {
                tracing::debug!("Out-of-band probe requested");
            }
        }

        let status = run_probe_cycle(&ctx).await;
        if status.is_terminal() {
            // Same-cycle stop: no further ticks may fire, and the
            // timeout guard is cancelled along with us.
            ctx.cancel.cancel();
            return;
        }
    }
}

/// Execute one probe cycle: probe both sub-resources concurrently,
/// merge, and apply under the stale-response guard.
///
/// Returns the session status after the cycle (unchanged if the cycle
/// was discarded as stale).
pub(crate) async fn run_probe_cycle(ctx: &SchedulerContext) -> SessionStatus {
    // Capture identity and generation before any await so the result
    // can be checked against the session's state at completion time.
    let (document_id, generation, status) = {
        let state = lock(&ctx.state);
        if !state.active {
            return state.status;
        }
        (state.document_id, state.generation, state.status)
    };
    debug_assert_eq!(status, SessionStatus::Processing);

    let _ = ctx
        .event_tx
        .send(SessionEvent::ProbeCycleStarted { generation });
    tracing::debug!(document_id = %document_id, generation, "Probe cycle started");

    // The two probes run concurrently; the cycle takes as long as the
    // slower of the two, not the sum.
    let (summary, classification) = tokio::join!(
        ctx.prober.probe(document_id, ResourceKind::Summary),
        ctx.prober.probe(document_id, ResourceKind::Classification),
    );

    for outcome in [&summary, &classification] {
        let _ = ctx.event_tx.send(SessionEvent::ProbeSettled {
            kind: outcome.kind,
            ready: outcome.ready,
            failure: outcome.failure.clone(),
        });
    }

    let applied = lock(&ctx.state).apply_merged(generation, summary, classification);

    match applied {
        TickApplied::Applied { from, to } => {
            if from != to {
                tracing::info!(
                    document_id = %document_id,
                    from = from.as_str(),
                    to = to.as_str(),
                    "Session status changed",
                );
                let _ = ctx.event_tx.send(SessionEvent::StatusChanged { from, to });
            }
            to
        }
        TickApplied::Discarded => {
            tracing::debug!(
                document_id = %document_id,
                generation,
                "Stale probe cycle discarded",
            );
            lock(&ctx.state).status
        }
    }
}

/// Lock the session state, recovering from a poisoned mutex (state
/// writes are small field updates that cannot be left half-done).
pub(crate) fn lock(state: &Arc<Mutex<SessionState>>) -> std::sync::MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
