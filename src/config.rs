//! Process configuration

use crate::runtime::DEFAULT_QUEUE_CAPACITY;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".data";
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for the bot server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Directory holding `countries.json` and `lighthouses.json`
    pub data_dir: PathBuf,
    pub port: u16,
    /// Per-chat event queue capacity
    pub session_queue: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
            session_queue: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable numbers fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("LIGHTHOUSE_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            port: lookup("LIGHTHOUSE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            session_queue: lookup("LIGHTHOUSE_SESSION_QUEUE")
                .and_then(|q| q.parse().ok())
                .filter(|q| *q > 0)
                .unwrap_or(defaults.session_queue),
        }
    }
}
