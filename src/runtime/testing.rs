//! Mock implementations for testing
//!
//! These mocks enable integration testing without a real chat network.

use super::traits::*;
use crate::state_machine::Effect;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock Transport
// ============================================================================

/// Mock transport that records every delivery
#[derive(Default)]
pub struct MockTransport {
    /// Record of all deliveries, in order
    pub deliveries: Mutex<Vec<(String, Effect)>>,
    failing: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent deliveries fail (still recorded)
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Effects delivered to one chat
    pub fn delivered_to(&self, chat_id: &str) -> Vec<Effect> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == chat_id)
            .map(|(_, effect)| effect.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn deliver(&self, chat_id: &str, effect: &Effect) -> Result<(), TransportError> {
        self.deliveries
            .lock()
            .unwrap()
            .push((chat_id.to_string(), effect.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::delivery(chat_id, "mock failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample;
    use crate::runtime::{SessionManager, DEFAULT_QUEUE_CAPACITY};
    use crate::state_machine::{ConvState, Event};
    use std::sync::Arc;

    fn manager() -> SessionManager<MockTransport> {
        SessionManager::new(
            Arc::new(sample()),
            Arc::new(MockTransport::new()),
            DEFAULT_QUEUE_CAPACITY,
        )
    }

    fn start() -> Event {
        Event::Start {
            user_name: "Ada".to_string(),
        }
    }

    fn text(value: &str) -> Event {
        Event::Text {
            value: value.to_string(),
        }
    }

    /// Run the funnel up to the first result
    async fn search(manager: &SessionManager<MockTransport>, chat_id: &str, state: &str) -> ConvState {
        manager.dispatch(chat_id, start()).await.unwrap();
        manager.dispatch(chat_id, text("India")).await.unwrap();
        manager.dispatch(chat_id, text(state)).await.unwrap();
        manager
            .dispatch(
                chat_id,
                Event::Location {
                    latitude: 9.97,
                    longitude: 76.24,
                },
            )
            .await
            .unwrap()
            .state
    }

    #[tokio::test]
    async fn test_full_search_delivers_in_order() {
        let manager = manager();
        let state = search(&manager, "chat-1", "Kerala").await;
        assert_eq!(state, ConvState::NextAllowed);

        let delivered = manager.transport().delivered_to("chat-1");
        // start: 2, country: 2, state: 2, first result: 4
        assert_eq!(delivered.len(), 10);
        assert!(matches!(delivered[1], Effect::PresentOptions { .. }));
        assert_eq!(delivered[4], Effect::ClearOptions);
        assert_eq!(
            delivered[6],
            Effect::send_text("Your nearest lighthouse is Kochi at:")
        );
        assert!(matches!(delivered[7], Effect::SendLocation { .. }));

        let outcome = manager.dispatch("chat-1", Event::Next).await.unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.state, ConvState::NextAllowed);
        assert_eq!(manager.active_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let manager = manager();
        assert_eq!(search(&manager, "kerala", "Kerala").await, ConvState::NextAllowed);
        assert_eq!(search(&manager, "goa", "Goa").await, ConvState::PrevAllowed);
        assert_eq!(manager.active_sessions().await, 2);

        // /next is only valid for the Kerala chat
        let kerala = manager.dispatch("kerala", Event::Next).await.unwrap();
        let goa = manager.dispatch("goa", Event::Next).await.unwrap();
        assert!(kerala.accepted);
        assert!(!goa.accepted);
        assert_eq!(goa.state, ConvState::PrevAllowed);
    }

    #[tokio::test]
    async fn test_rejected_event_delivers_nothing() {
        let manager = manager();
        manager.dispatch("chat-1", start()).await.unwrap();
        manager.transport().clear();

        let outcome = manager.dispatch("chat-1", text("Atlantis")).await.unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.state, ConvState::AwaitingCountry);
        assert!(outcome.error.unwrap().contains("Atlantis"));
        assert!(manager.transport().delivered_to("chat-1").is_empty());
    }

    #[tokio::test]
    async fn test_stop_releases_session() {
        let manager = manager();
        search(&manager, "chat-1", "Kerala").await;

        let outcome = manager
            .dispatch(
                "chat-1",
                Event::Stop {
                    user_name: "Ada".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.state, ConvState::Ended);
        assert_eq!(manager.active_sessions().await, 0);

        // A new event starts over from Idle
        let outcome = manager.dispatch("chat-1", Event::Next).await.unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.state, ConvState::Idle);

        let outcome = manager.dispatch("chat-1", start()).await.unwrap();
        assert_eq!(outcome.state, ConvState::AwaitingCountry);
    }

    #[tokio::test]
    async fn test_no_results_releases_session() {
        let manager = manager();
        let state = search(&manager, "chat-1", "Karnataka").await;
        assert_eq!(state, ConvState::Ended);
        assert_eq!(manager.active_sessions().await, 0);

        let delivered = manager.transport().delivered_to("chat-1");
        assert_eq!(
            delivered.last().and_then(Effect::text),
            Some("No more lighthouses found! You can try again with /start command.")
        );
    }

    #[tokio::test]
    async fn test_delivery_failures_do_not_stop_the_session() {
        let manager = manager();
        manager.transport().fail_deliveries(true);

        let outcome = manager.dispatch("chat-1", start()).await.unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.delivery_failures, 2);
        // Every effect was still attempted
        assert_eq!(manager.transport().delivered_to("chat-1").len(), 2);

        manager.transport().fail_deliveries(false);
        let outcome = manager.dispatch("chat-1", text("India")).await.unwrap();
        assert_eq!(outcome.state, ConvState::AwaitingState);
        assert_eq!(outcome.delivery_failures, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_start_racing_stop_is_never_lost() {
        for round in 0..100 {
            let manager = Arc::new(manager());
            let chat_id = format!("chat-{round}");
            manager.dispatch(&chat_id, start()).await.unwrap();

            let stop = {
                let manager = Arc::clone(&manager);
                let chat_id = chat_id.clone();
                tokio::spawn(async move {
                    let stop = Event::Stop {
                        user_name: "Ada".to_string(),
                    };
                    manager.dispatch(&chat_id, stop).await.unwrap()
                })
            };
            let restart = {
                let manager = Arc::clone(&manager);
                let chat_id = chat_id.clone();
                tokio::spawn(async move { manager.dispatch(&chat_id, start()).await.unwrap() })
            };
            assert_eq!(stop.await.unwrap().state, ConvState::Ended);
            assert_eq!(restart.await.unwrap().state, ConvState::AwaitingCountry);

            // Whichever of the two ran last decides where the chat is now
            let stopped_last = matches!(
                manager.transport().delivered_to(&chat_id).last(),
                Some(Effect::SendText { text }) if text.starts_with("Bye")
            );
            let outcome = manager.dispatch(&chat_id, text("India")).await.unwrap();
            if stopped_last {
                assert!(!outcome.accepted);
                assert_eq!(outcome.state, ConvState::Idle);
            } else {
                assert!(outcome.accepted, "restarted session lost in round {round}");
                assert_eq!(outcome.state, ConvState::AwaitingState);
            }
        }
    }

    #[tokio::test]
    async fn test_outcome_carries_its_own_outputs() {
        let manager = manager();
        let outcome = manager.dispatch("chat-1", start()).await.unwrap();
        assert_eq!(outcome.outputs.len(), 2);
        assert!(matches!(outcome.outputs[1], Effect::PresentOptions { .. }));

        let outcome = manager.dispatch("chat-1", text("Atlantis")).await.unwrap();
        assert!(outcome.outputs.is_empty());

        let outcome = manager.dispatch("chat-1", text("India")).await.unwrap();
        assert_eq!(
            outcome.outputs[0],
            Effect::send_text("Country chosen: India.\n\nChoose the state you're in:")
        );
    }

    #[tokio::test]
    async fn test_concurrent_chats() {
        let manager = Arc::new(manager());
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { search(&manager, &format!("chat-{i}"), "Kerala").await })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), ConvState::NextAllowed);
        }
        assert_eq!(manager.active_sessions().await, 8);
    }
}
