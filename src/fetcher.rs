//! Debounced single-flight address fetcher
//!
//! One `DebouncedFetcher` per address field. Keystrokes go in through
//! `submit()`, which cancels whatever the field had pending and arms a new
//! delay timer on the tokio runtime. When the timer expires the task issues
//! a single lookup and reports back over a channel that the UI drains with
//! `poll()`.
//!
//! Every submit bumps the field's generation. Events carry the generation
//! they were started under, and `poll()` drops any event whose generation is
//! no longer current, so a superseded request can never touch the list.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::config::LookupConfig;
use crate::lookup::{AddressLookup, LookupError, Suggestion};

mod task;

/// Shortest input that triggers a lookup
pub const MIN_QUERY_CHARS: usize = 3;

/// Quiet period before a lookup is issued
pub const DEBOUNCE_MS: u64 = 300;

/// Where a change to the field text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    /// The operator typed or deleted characters
    Typed,
    /// A suggestion was picked from the list
    Selection,
}

/// Lifecycle of the field's pending work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    /// Timer armed, no request yet
    Debouncing,
    /// Request issued, waiting for the service
    InFlight,
}

/// Timing knobs for a fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub debounce: Duration,
    pub min_chars: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            min_chars: MIN_QUERY_CHARS,
        }
    }
}

impl From<&LookupConfig> for FetchSettings {
    fn from(config: &LookupConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_chars: config.min_chars,
        }
    }
}

/// Messages from a lookup task back to its fetcher
#[derive(Debug)]
pub enum FetchEvent {
    /// Timer expired and the request was issued
    Dispatched { generation: u64 },
    /// The service answered
    Resolved {
        generation: u64,
        suggestions: Vec<Suggestion>,
    },
    /// Transport or service failure
    Failed { generation: u64, error: LookupError },
    /// The task saw its token cancelled
    Cancelled { generation: u64 },
}

impl FetchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            FetchEvent::Dispatched { generation }
            | FetchEvent::Resolved { generation, .. }
            | FetchEvent::Failed { generation, .. }
            | FetchEvent::Cancelled { generation } => *generation,
        }
    }
}

/// Per-field debounced single-flight controller
pub struct DebouncedFetcher {
    /// Field name, for logs
    field: &'static str,
    lookup: Arc<dyn AddressLookup>,
    runtime: Handle,
    settings: FetchSettings,
    /// Bumped on every submit/dispose; events from older generations are stale
    generation: u64,
    phase: FetchPhase,
    /// Token of the pending timer or in-flight request, if any
    cancel_token: Option<CancellationToken>,
    suggestions: Vec<Suggestion>,
    /// Query text of the pending or in-flight request
    pending_query: Option<String>,
    event_tx: Sender<FetchEvent>,
    event_rx: Receiver<FetchEvent>,
}

impl DebouncedFetcher {
    pub fn new(
        field: &'static str,
        lookup: Arc<dyn AddressLookup>,
        runtime: Handle,
        settings: FetchSettings,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            field,
            lookup,
            runtime,
            settings,
            generation: 0,
            phase: FetchPhase::Idle,
            cancel_token: None,
            suggestions: Vec::new(),
            pending_query: None,
            event_tx,
            event_rx,
        }
    }

    /// Feed the current field text
    ///
    /// Short input and selections clear the list right away. Anything else
    /// restarts the debounce timer for `text`.
    pub fn submit(&mut self, text: &str, origin: InputOrigin) {
        self.cancel_pending();

        if origin == InputOrigin::Selection || text.chars().count() < self.settings.min_chars {
            if !self.suggestions.is_empty() {
                log::debug!("[{}] clearing suggestions", self.field);
            }
            self.suggestions.clear();
            return;
        }

        let token = CancellationToken::new();
        let job = task::LookupJob {
            field: self.field,
            query: text.to_string(),
            generation: self.generation,
            debounce: self.settings.debounce,
            lookup: Arc::clone(&self.lookup),
            token: token.clone(),
            event_tx: self.event_tx.clone(),
        };

        log::debug!(
            "[{}] debouncing {:?} (generation {})",
            self.field,
            text,
            self.generation
        );
        self.cancel_token = Some(token);
        self.pending_query = Some(text.to_string());
        self.phase = FetchPhase::Debouncing;
        self.runtime.spawn(task::run(job));
    }

    /// Drain task events, applying only those of the current generation
    ///
    /// Returns true if the suggestion list changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.event_rx.try_recv() {
            if event.generation() != self.generation {
                log::debug!(
                    "[{}] discarding stale event from generation {} (current: {})",
                    self.field,
                    event.generation(),
                    self.generation
                );
                continue;
            }

            match event {
                FetchEvent::Dispatched { .. } => {
                    self.phase = FetchPhase::InFlight;
                }
                FetchEvent::Resolved { suggestions, .. } => {
                    log::debug!(
                        "[{}] {} suggestions for {:?}",
                        self.field,
                        suggestions.len(),
                        self.pending_query
                    );
                    self.suggestions = suggestions;
                    self.finish();
                    changed = true;
                }
                FetchEvent::Failed { error, .. } => {
                    log::warn!("[{}] lookup failed: {}", self.field, error);
                    self.finish();
                }
                FetchEvent::Cancelled { .. } => {
                    self.finish();
                }
            }
        }

        changed
    }

    /// Cancel everything and forget the suggestions
    pub fn dispose(&mut self) {
        self.cancel_pending();
        self.suggestions.clear();
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a timer or request is outstanding
    pub fn is_pending(&self) -> bool {
        self.phase != FetchPhase::Idle
    }

    /// Cancel the outstanding timer/request and invalidate its events
    fn cancel_pending(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            log::debug!(
                "[{}] cancelling generation {} ({:?})",
                self.field,
                self.generation,
                self.phase
            );
            token.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
        self.pending_query = None;
        self.phase = FetchPhase::Idle;
    }

    fn finish(&mut self) {
        self.cancel_token = None;
        self.pending_query = None;
        self.phase = FetchPhase::Idle;
    }
}

impl Drop for DebouncedFetcher {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
