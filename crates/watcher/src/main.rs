//! Terminal watcher for a document's processing status.
//!
//! Starts a polling session against the backend configured via
//! `DOCPULSE_API_URL` and logs session events until the document
//! completes or times out, then prints the final snapshot as JSON.
//!
//! Usage: `docpulse-watcher <document-id>`

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docpulse_client::api::DocumentApi;
use docpulse_client::prober::HttpProber;
use docpulse_core::config::PollConfig;
use docpulse_core::types::DocumentId;
use docpulse_session::{PollingSession, SessionEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docpulse_watcher=info,docpulse_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url =
        std::env::var("DOCPULSE_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let document_id: DocumentId = std::env::args()
        .nth(1)
        .context("usage: docpulse-watcher <document-id>")?
        .parse()
        .context("document id must be a UUID")?;

    let prober: Arc<HttpProber> = Arc::new(HttpProber::new(DocumentApi::new(api_url)));
    let session = PollingSession::start(document_id, PollConfig::default(), prober)?;
    let mut events = session.subscribe();

    tracing::info!(document_id = %document_id, "Watching document processing");

    loop {
        let event = events.recv().await?;
        match &event {
            SessionEvent::ProbeSettled {
                kind,
                ready,
                failure,
            } => {
                tracing::info!(kind = kind.as_str(), ready, failure = ?failure, "Probe settled");
            }
            SessionEvent::StatusChanged { from, to } => {
                tracing::info!(from = from.as_str(), to = to.as_str(), "Status changed");
                if to.is_terminal() {
                    break;
                }
            }
            SessionEvent::TimedOut { after_ms } => {
                tracing::warn!(after_ms, "Gave up waiting");
            }
            _ => {}
        }
    }

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    session.release();
    Ok(())
}
