//! HTTP transport adapter
//!
//! Clients post chat events and get back the outputs the bot produced.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{TracingTransport, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager<TracingTransport>>,
}

impl AppState {
    pub fn new(sessions: SessionManager<TracingTransport>) -> Self {
        Self {
            sessions: Arc::new(sessions),
        }
    }
}
