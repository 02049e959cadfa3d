//! Chat runtime executor

use super::traits::Transport;
use super::{DispatchOutcome, Envelope};

use crate::catalog::Catalog;
use crate::state_machine::{transition, Event, Session};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Owns one chat's session and applies its events in arrival order
pub struct ChatRuntime<T: Transport + 'static> {
    session: Session,
    catalog: Arc<Catalog>,
    transport: Arc<T>,
    event_rx: mpsc::Receiver<Envelope>,
}

impl<T: Transport + 'static> ChatRuntime<T> {
    pub fn new(
        chat_id: &str,
        catalog: Arc<Catalog>,
        transport: Arc<T>,
        event_rx: mpsc::Receiver<Envelope>,
    ) -> Self {
        Self {
            session: Session::new(chat_id),
            catalog,
            transport,
            event_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(chat_id = %self.session.chat_id, "Starting chat runtime");

        // Process events in a loop until every sender is gone
        while let Some(Envelope { event, done }) = self.event_rx.recv().await {
            let outcome = self.process_event(event).await;
            let terminal = outcome.state.is_terminal();
            // The dispatcher may have given up waiting; nothing to do then
            let _ = done.send(outcome);

            if terminal {
                self.shut_down().await;
                break;
            }
        }

        tracing::info!(chat_id = %self.session.chat_id, "Chat runtime stopped");
    }

    /// Refuse new events and hand back the queued ones unprocessed.
    ///
    /// Dropping an envelope drops its `done` sender, which tells the
    /// dispatcher to resend the event to a fresh runtime.
    async fn shut_down(&mut self) {
        self.event_rx.close();
        let mut bounced = 0;
        while let Some(envelope) = self.event_rx.recv().await {
            drop(envelope);
            bounced += 1;
        }
        if bounced > 0 {
            tracing::debug!(
                chat_id = %self.session.chat_id,
                bounced,
                "Returned queued events after session ended"
            );
        }
    }

    async fn process_event(&mut self, event: Event) -> DispatchOutcome {
        let chat_id = self.session.chat_id.clone();
        let kind = event.kind();

        // Pure state transition
        let result = match transition(&self.session, &self.catalog, event) {
            Ok(r) => r,
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!(chat_id = %chat_id, error = %e, "Selection not in catalog");
                } else {
                    tracing::debug!(
                        chat_id = %chat_id,
                        state = ?self.session.state,
                        event = kind,
                        "Event ignored in current state"
                    );
                }
                return DispatchOutcome {
                    state: self.session.state,
                    accepted: false,
                    error: Some(e.to_string()),
                    delivery_failures: 0,
                    outputs: Vec::new(),
                };
            }
        };

        // Update state
        let old_state = std::mem::replace(&mut self.session, result.session).state;
        tracing::info!(
            chat_id = %chat_id,
            event = kind,
            from = ?old_state,
            to = ?self.session.state,
            country = self.session.selection.country.as_deref(),
            state_name = self.session.selection.state.as_deref(),
            results = self.session.cursor.len(),
            index = self.session.cursor.position(),
            "State transition"
        );

        // Deliver effects in order; a failed one does not stop the rest
        let mut delivery_failures = 0;
        for effect in &result.effects {
            if let Err(e) = self.transport.deliver(&chat_id, effect).await {
                delivery_failures += 1;
                tracing::error!(chat_id = %chat_id, error = %e, "Failed to deliver output");
            }
        }

        DispatchOutcome {
            state: self.session.state,
            accepted: true,
            error: None,
            delivery_failures,
            outputs: result.effects,
        }
    }
}
