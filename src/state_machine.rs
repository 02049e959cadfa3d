//! Lighthouse search conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `transition` takes the current session, the catalog and an event, and
//! returns the next session plus the outputs to hand to the transport.

pub mod cursor;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{ConvState, Session};
pub use transition::transition;
