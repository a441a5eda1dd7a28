//! Timer + lookup task spawned for each accepted keystroke

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::FetchEvent;
use crate::lookup::{AddressLookup, LookupError};

pub(super) struct LookupJob {
    pub field: &'static str,
    pub query: String,
    pub generation: u64,
    pub debounce: Duration,
    pub lookup: Arc<dyn AddressLookup>,
    pub token: CancellationToken,
    pub event_tx: Sender<FetchEvent>,
}

/// Wait out the debounce window, then issue one lookup
///
/// Both waits race the cancellation token (biased, so a cancel that is
/// already signalled always wins). A dropped receiver just means the field
/// went away.
pub(super) async fn run(job: LookupJob) {
    let LookupJob {
        field,
        query,
        generation,
        debounce,
        lookup,
        token,
        event_tx,
    } = job;

    tokio::select! {
        biased;
        _ = token.cancelled() => {
            log::debug!("[{}] timer for {:?} cancelled", field, query);
            return;
        }
        _ = tokio::time::sleep(debounce) => {}
    }

    log::debug!("[{}] sending lookup for {:?}", field, query);
    if event_tx.send(FetchEvent::Dispatched { generation }).is_err() {
        return;
    }

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(LookupError::Cancelled),
        result = lookup.lookup(&query) => result,
    };

    let event = match result {
        Ok(suggestions) if !token.is_cancelled() => FetchEvent::Resolved {
            generation,
            suggestions,
        },
        Ok(_) | Err(LookupError::Cancelled) => {
            log::debug!("[{}] cancelled request for {:?}", field, query);
            FetchEvent::Cancelled { generation }
        }
        Err(error) => FetchEvent::Failed { generation, error },
    };

    let _ = event_tx.send(event);
}
