//! Conversation session types

use super::cursor::ResultCursor;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// Where a chat is in the search funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvState {
    /// No search started yet
    #[default]
    Idle,

    /// Country keyboard shown, waiting for a country name
    AwaitingCountry,

    /// State keyboard shown, waiting for a state name
    AwaitingState,

    /// Waiting for the user to share a location
    AwaitingLocation,

    /// Showing a result; only `/next` is accepted
    NextAllowed,

    /// Showing a result; only `/prev` is accepted
    PrevAllowed,

    /// Conversation over; only `/start` begins a new one
    Ended,
}

impl ConvState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConvState::Ended)
    }

    /// Check if results are being paged through
    #[allow(dead_code)] // Used in tests
    pub fn is_browsing(self) -> bool {
        matches!(self, ConvState::NextAllowed | ConvState::PrevAllowed)
    }
}

/// What the user has picked so far
///
/// Filled in funnel order; once the location is set nothing else changes
/// until the next `/start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<Coordinates>,
}

/// Per-chat scratch state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub chat_id: String,
    pub state: ConvState,
    pub selection: UserSelection,
    pub cursor: ResultCursor,
}

impl Session {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            state: ConvState::Idle,
            selection: UserSelection::default(),
            cursor: ResultCursor::default(),
        }
    }

    /// Fresh selection and results, keeping the chat identity
    pub fn restarted(&self) -> Self {
        Self {
            state: ConvState::AwaitingCountry,
            ..Self::new(self.chat_id.clone())
        }
    }

    pub fn with_state(mut self, state: ConvState) -> Self {
        self.state = state;
        self
    }
}
