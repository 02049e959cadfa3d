//! Pure state transition function

use super::cursor::{ordinal_label, CursorError, Navigation, Page, ResultCursor};
use super::{ConvState, Effect, Event, Session};
use crate::catalog::Catalog;
use crate::geo::Coordinates;
use crate::ranking::rank;
use thiserror::Error;

const STOP_HINT: &str = "Satisfied? Stop search by /bye command:";
const NEXT_HINT: &str = "Already visited? Find the next by /next command:";
const PREV_HINT: &str = "Find the previous result by /prev command:";
const NO_RESULTS: &str = "No more lighthouses found! You can try again with /start command.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
///
/// None of these change the session: the conversation stays where it was.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("State not found in {country}: {state}")]
    StateNotFound { country: String, state: String },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Name lookup failed against the catalog
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TransitionError::CountryNotFound(_) | TransitionError::StateNotFound { .. }
        )
    }
}

/// Pure transition function
///
/// Given the same session, catalog and event it always produces the same
/// result, with no I/O. The caller applies `result.session` and delivers
/// `result.effects` in order.
pub fn transition(
    session: &Session,
    catalog: &Catalog,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (session.state, event) {
        // Stop is accepted everywhere
        (_, Event::Stop { user_name }) => Ok(TransitionResult::new(
            session.clone().with_state(ConvState::Ended),
        )
        .with_effect(Effect::ClearOptions)
        .with_effect(Effect::send_text(format!(
            "Bye {user_name}. See you later."
        )))),

        // Start (re)creates the selection whatever came before
        (_, Event::Start { user_name }) => Ok(TransitionResult::new(session.restarted())
            .with_effect(Effect::send_text(format!(
                "Hi {user_name}.\n\
                 Welcome to Lighthouse Bot.\n\
                 Let's find the lighthouse nearest to you.\n\
                 Send /bye anytime you want to stop searching.\n\n\
                 Choose the country you're in now:"
            )))
            .with_effect(Effect::present_options(catalog.country_names()))),

        (ConvState::AwaitingCountry, Event::Text { value }) => {
            let country = catalog
                .country(&value)
                .map_err(|_| TransitionError::CountryNotFound(value.clone()))?;

            let mut next = session.clone().with_state(ConvState::AwaitingState);
            next.selection.country = Some(country.name.clone());

            Ok(TransitionResult::new(next)
                .with_effect(Effect::send_text(format!(
                    "Country chosen: {}.\n\nChoose the state you're in:",
                    country.name
                )))
                .with_effect(Effect::present_options(country.state_names())))
        }

        (ConvState::AwaitingState, Event::Text { value }) => {
            let country = session.selection.country.as_deref().ok_or_else(|| {
                TransitionError::InvalidTransition("No country selected".to_string())
            })?;
            let state = catalog.state(country, &value).map_err(|_| {
                TransitionError::StateNotFound {
                    country: country.to_string(),
                    state: value.clone(),
                }
            })?;

            let mut next = session.clone().with_state(ConvState::AwaitingLocation);
            next.selection.state = Some(state.name.clone());

            Ok(TransitionResult::new(next)
                .with_effect(Effect::ClearOptions)
                .with_effect(Effect::send_text(format!(
                    "State chosen: {}.\n\nSend your location:",
                    state.name
                ))))
        }

        (
            ConvState::AwaitingLocation,
            Event::Location {
                latitude,
                longitude,
            },
        ) => {
            let (Some(country), Some(state)) = (
                session.selection.country.as_deref(),
                session.selection.state.as_deref(),
            ) else {
                return Err(TransitionError::InvalidTransition(
                    "Country and state must be chosen before the location".to_string(),
                ));
            };

            let origin = Coordinates::new(latitude, longitude);
            let mut next = session.clone();
            next.selection.location = Some(origin);
            next.cursor = ResultCursor::new(rank(catalog, country, state, origin));

            let step = next.cursor.advance();
            Ok(present(next, step))
        }

        (ConvState::NextAllowed, Event::Next) => {
            let mut next = session.clone();
            let step = next.cursor.advance();
            Ok(present(next, step))
        }

        (ConvState::PrevAllowed, Event::Prev) => {
            let mut next = session.clone();
            let step = next.cursor.retreat();
            Ok(present(next, step))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {}",
            event.kind()
        ))),
    }
}

/// Show the page a cursor move landed on, or end the search if there was nothing
fn present(session: Session, step: Result<Page, CursorError>) -> TransitionResult {
    let page = match step {
        Ok(page) => page,
        Err(CursorError::NoResults) => {
            return TransitionResult::new(session.with_state(ConvState::Ended))
                .with_effect(Effect::send_text(NO_RESULTS));
        }
    };

    let (state, hint) = match page.navigation {
        Navigation::Next => (ConvState::NextAllowed, NEXT_HINT),
        Navigation::Prev => (ConvState::PrevAllowed, PREV_HINT),
    };

    TransitionResult::new(session.with_state(state)).with_effects([
        Effect::send_text(format!(
            "Your {}nearest lighthouse is {} at:",
            ordinal_label(page.index),
            page.result.name
        )),
        Effect::send_location(page.result.coordinates()),
        Effect::send_text(STOP_HINT),
        Effect::send_text(hint),
    ])
}
