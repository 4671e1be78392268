//! Background summary worker — processes one request at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use precis_core::{Error, Result, SummaryLength};

use crate::service::SummaryService;

/// A queued summarization request.
pub struct SummaryRequest {
    pub text: String,
    pub length: SummaryLength,
    pub reply: oneshot::Sender<Result<String>>,
}

/// Handle for submitting requests to the worker.
pub type SummarySender = mpsc::UnboundedSender<SummaryRequest>;

/// Start the background summary worker task.
///
/// Requests are processed strictly in submission order, one at a time;
/// the engine never sees concurrent calls.
pub fn start_worker(service: Arc<SummaryService>) -> SummarySender {
    let (tx, mut rx) = mpsc::unbounded_channel::<SummaryRequest>();

    tokio::spawn(async move {
        info!("Summary worker started");
        while let Some(request) = rx.recv().await {
            let SummaryRequest {
                text,
                length,
                reply,
            } = request;

            let task_service = service.clone();
            let outcome =
                tokio::task::spawn_blocking(move || task_service.summarize_text(&text, length))
                    .await
                    .unwrap_or_else(|e| {
                        Err(Error::Internal(format!("Summary task panicked: {}", e)))
                    });

            if reply.send(outcome).is_err() {
                warn!("Summary request abandoned before completion");
            }
        }
    });

    tx
}

/// Submit a request to the worker and wait for its summary.
pub async fn submit(tx: &SummarySender, text: String, length: SummaryLength) -> Result<String> {
    let (reply_tx, reply_rx) = oneshot::channel();
    tx.send(SummaryRequest {
        text,
        length,
        reply: reply_tx,
    })
    .map_err(|_| Error::Internal("Summary worker is not running".to_string()))?;

    reply_rx
        .await
        .map_err(|_| Error::Internal("Summary worker dropped the request".to_string()))?
}
