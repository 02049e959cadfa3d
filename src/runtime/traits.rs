//! Trait abstractions for runtime I/O
//!
//! The core never talks to a chat network itself; it hands effects to a
//! `Transport`, which lets tests swap in a recording mock.

use crate::state_machine::Effect;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Delivery to {chat_id} failed: {message}")]
    Delivery { chat_id: String, message: String },
}

impl TransportError {
    pub fn delivery(chat_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            chat_id: chat_id.into(),
            message: message.into(),
        }
    }
}

/// Delivers state machine outputs to a chat
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one output. Failures are reported, never retried by the caller.
    async fn deliver(&self, chat_id: &str, effect: &Effect) -> Result<(), TransportError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn deliver(&self, chat_id: &str, effect: &Effect) -> Result<(), TransportError> {
        (**self).deliver(chat_id, effect).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Records each delivered output in the service log
///
/// Used behind the HTTP adapter, which answers every request with the
/// outputs of its own event.
#[derive(Debug, Default)]
pub struct TracingTransport;

impl TracingTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for TracingTransport {
    async fn deliver(&self, chat_id: &str, effect: &Effect) -> Result<(), TransportError> {
        match effect {
            Effect::SendText { text } => {
                tracing::debug!(chat_id = %chat_id, text = %text, "Sent text");
            }
            Effect::SendLocation {
                latitude,
                longitude,
            } => {
                tracing::debug!(chat_id = %chat_id, latitude, longitude, "Sent location");
            }
            Effect::PresentOptions { options } => {
                tracing::debug!(chat_id = %chat_id, options = options.len(), "Presented options");
            }
            Effect::ClearOptions => {
                tracing::debug!(chat_id = %chat_id, "Cleared options");
            }
        }
        Ok(())
    }
}
