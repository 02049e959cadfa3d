//! Runtime for executing chat sessions
//!
//! Each chat gets its own task that owns the `Session` and handles that
//! chat's events one at a time. Sessions never share mutable state.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;

use crate::catalog::Catalog;
use crate::state_machine::{ConvState, Effect, Event};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, RwLock};

/// Default capacity of each chat's event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Attempts to hand an event to a live runtime before giving up
const MAX_DISPATCH_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Chat runtime for {0} stopped before handling the event")]
    RuntimeGone(String),
}

/// What happened to one dispatched event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    /// Session state after the event
    pub state: ConvState,
    /// Whether the state machine accepted the event
    pub accepted: bool,
    /// Why the event was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Effects the transport failed to deliver
    pub delivery_failures: usize,
    /// Everything this event produced, in delivery order
    pub outputs: Vec<Effect>,
}

/// An event queued for a chat runtime, with its completion signal
#[derive(Debug)]
pub struct Envelope {
    pub event: Event,
    pub done: oneshot::Sender<DispatchOutcome>,
}

/// Handle to interact with a running chat
struct ChatHandle {
    event_tx: mpsc::Sender<Envelope>,
}

/// Session store: one runtime per chat id
///
/// A runtime is spawned on the first event for a chat and dropped once its
/// session reaches `Ended`. The next event for that chat starts afresh.
pub struct SessionManager<T: Transport + 'static> {
    catalog: Arc<Catalog>,
    transport: Arc<T>,
    queue_capacity: usize,
    runtimes: RwLock<HashMap<String, ChatHandle>>,
}

impl<T: Transport + 'static> SessionManager<T> {
    pub fn new(catalog: Arc<Catalog>, transport: Arc<T>, queue_capacity: usize) -> Self {
        Self {
            catalog,
            transport,
            queue_capacity: queue_capacity.max(1),
            runtimes: RwLock::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[allow(dead_code)] // Used in tests
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Number of chats with a live session
    #[allow(dead_code)] // Used in tests
    pub async fn active_sessions(&self) -> usize {
        self.runtimes.read().await.len()
    }

    /// Hand an event to the chat's runtime and wait until it has been handled
    /// and its effects delivered.
    pub async fn dispatch(
        &self,
        chat_id: &str,
        event: Event,
    ) -> Result<DispatchOutcome, DispatchError> {
        // A runtime that ends its session closes its queue and returns any
        // events still waiting in it; those go to a fresh runtime.
        for _ in 0..MAX_DISPATCH_ATTEMPTS {
            let event_tx = self.get_or_create(chat_id).await;
            let (done_tx, done_rx) = oneshot::channel();
            let envelope = Envelope {
                event: event.clone(),
                done: done_tx,
            };

            if event_tx.send(envelope).await.is_ok() {
                if let Ok(outcome) = done_rx.await {
                    if outcome.state.is_terminal() {
                        self.remove(chat_id, &event_tx).await;
                    }
                    return Ok(outcome);
                }
            }

            tracing::debug!(chat_id = %chat_id, "Chat runtime closed, restarting");
            self.remove(chat_id, &event_tx).await;
        }

        Err(DispatchError::RuntimeGone(chat_id.to_string()))
    }

    async fn get_or_create(&self, chat_id: &str) -> mpsc::Sender<Envelope> {
        // Check if already running
        {
            let runtimes = self.runtimes.read().await;
            if let Some(handle) = runtimes.get(chat_id) {
                if !handle.event_tx.is_closed() {
                    return handle.event_tx.clone();
                }
            }
        }

        let mut runtimes = self.runtimes.write().await;
        // Another dispatch may have won the race for the write lock
        if let Some(handle) = runtimes.get(chat_id) {
            if !handle.event_tx.is_closed() {
                return handle.event_tx.clone();
            }
        }

        let (event_tx, event_rx) = mpsc::channel(self.queue_capacity);
        let runtime = ChatRuntime::new(
            chat_id,
            Arc::clone(&self.catalog),
            Arc::clone(&self.transport),
            event_rx,
        );

        // Start runtime in background
        let id = chat_id.to_string();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::debug!(chat_id = %id, "Chat runtime finished");
        });

        runtimes.insert(
            chat_id.to_string(),
            ChatHandle {
                event_tx: event_tx.clone(),
            },
        );
        event_tx
    }

    /// Drop the chat's handle if it still points at the given runtime
    async fn remove(&self, chat_id: &str, event_tx: &mpsc::Sender<Envelope>) {
        let mut runtimes = self.runtimes.write().await;
        if runtimes
            .get(chat_id)
            .is_some_and(|handle| handle.event_tx.same_channel(event_tx))
        {
            runtimes.remove(chat_id);
            tracing::info!(chat_id = %chat_id, "Session released");
        }
    }
}
