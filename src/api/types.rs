//! API request and response types

use crate::catalog::Country;
use serde::{Deserialize, Serialize};

/// A raw chat message; `/start`, `/next`, `/prev` and `/bye` are commands
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
    #[serde(default)]
    pub user_name: String,
}

/// Response with the catalog's countries and their states
#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
