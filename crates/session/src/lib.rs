//! Polling session state machine for document processing status.
//!
//! A [`session::PollingSession`] owns two cooperating timer tasks bound
//! to one document: a repeating poll scheduler (first tick at t=0, then
//! fixed cadence) and a one-shot timeout guard. Probe results from the
//! two sub-resources are merged into a monotonic session status, and a
//! generation-tagged stale-response guard ensures that nothing issued
//! before `release()` can mutate the session afterwards.

pub mod events;
pub mod session;
pub mod state;

mod scheduler;
mod timeout;

pub use events::SessionEvent;
pub use session::{PollingSession, SessionError, SessionSnapshot};
pub use timeout::TIMEOUT_MESSAGE;
