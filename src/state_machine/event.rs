//! Events that can occur in a conversation

use serde::{Deserialize, Serialize};

pub const START_COMMAND: &str = "/start";
pub const NEXT_COMMAND: &str = "/next";
pub const PREV_COMMAND: &str = "/prev";
pub const STOP_COMMAND: &str = "/bye";

/// Events delivered by the chat transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Start {
        #[serde(default)]
        user_name: String,
    },
    /// Free text, e.g. a country or state picked from the keyboard
    Text { value: String },
    Location { latitude: f64, longitude: f64 },
    Next,
    Prev,
    Stop {
        #[serde(default)]
        user_name: String,
    },
}

impl Event {
    /// Interpret a raw chat message, mapping bot commands to their events
    pub fn from_message(text: &str, user_name: &str) -> Self {
        // Telegram-style commands may carry a bot suffix and arguments:
        // /next@lighthouse_bot, /start now
        let command = text
            .split_whitespace()
            .next()
            .and_then(|word| word.split('@').next())
            .unwrap_or_default();
        match command {
            START_COMMAND => Event::Start {
                user_name: user_name.to_string(),
            },
            NEXT_COMMAND => Event::Next,
            PREV_COMMAND => Event::Prev,
            STOP_COMMAND => Event::Stop {
                user_name: user_name.to_string(),
            },
            _ => Event::Text {
                value: text.to_string(),
            },
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::Text { .. } => "text",
            Event::Location { .. } => "location",
            Event::Next => "next",
            Event::Prev => "prev",
            Event::Stop { .. } => "stop",
        }
    }
}
