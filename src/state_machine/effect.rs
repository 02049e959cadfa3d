//! Effects produced by state transitions
//!
//! Each effect is one discrete output for the chat transport, delivered in
//! the order the transition produced them.

use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// Outputs to be delivered after a state transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Send a plain text message
    SendText { text: String },

    /// Send a map pin
    SendLocation { latitude: f64, longitude: f64 },

    /// Show a one-time selection keyboard under the previous message
    PresentOptions { options: Vec<String> },

    /// Remove any selection keyboard
    ClearOptions,
}

impl Effect {
    pub fn send_text(text: impl Into<String>) -> Self {
        Effect::SendText { text: text.into() }
    }

    pub fn send_location(at: Coordinates) -> Self {
        Effect::SendLocation {
            latitude: at.latitude,
            longitude: at.longitude,
        }
    }

    pub fn present_options(options: Vec<String>) -> Self {
        Effect::PresentOptions { options }
    }

    /// Text of a `SendText` effect
    #[allow(dead_code)] // Used in tests
    pub fn text(&self) -> Option<&str> {
        match self {
            Effect::SendText { text } => Some(text),
            _ => None,
        }
    }
}
