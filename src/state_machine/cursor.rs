//! Pagination over a session's ranked results

use crate::ranking::RankedResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("No results to page through")]
    NoResults,
}

/// The single navigation command accepted after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Next,
    Prev,
}

/// The result shown after a cursor move
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub result: RankedResult,
    pub navigation: Navigation,
}

/// Ranked results plus the index of the one currently shown.
///
/// `position` is `None` until the first move, otherwise always a valid
/// index into `results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCursor {
    results: Vec<RankedResult>,
    position: Option<usize>,
}

impl ResultCursor {
    pub fn new(results: Vec<RankedResult>) -> Self {
        Self {
            results,
            position: None,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    #[allow(dead_code)] // Used in tests
    pub fn current(&self) -> Option<&RankedResult> {
        self.position.and_then(|i| self.results.get(i))
    }

    /// Move one result forward, clamping at the last one.
    ///
    /// Landing on the last index permits only `/prev` next; anything
    /// before it permits only `/next`.
    pub fn advance(&mut self) -> Result<Page, CursorError> {
        let last = self.last_index()?;
        let index = self.position.map_or(0, |p| p + 1).min(last);
        let navigation = if index == last {
            Navigation::Prev
        } else {
            Navigation::Next
        };
        Ok(self.move_to(index, navigation))
    }

    /// Move one result back, clamping at the first one.
    ///
    /// Landing on index 0 permits only `/next` next; anything after it
    /// permits only `/prev`.
    pub fn retreat(&mut self) -> Result<Page, CursorError> {
        let last = self.last_index()?;
        let index = self.position.map_or(0, |p| p.saturating_sub(1)).min(last);
        let navigation = if index == 0 {
            Navigation::Next
        } else {
            Navigation::Prev
        };
        Ok(self.move_to(index, navigation))
    }

    fn last_index(&self) -> Result<usize, CursorError> {
        self.results.len().checked_sub(1).ok_or(CursorError::NoResults)
    }

    fn move_to(&mut self, index: usize, navigation: Navigation) -> Page {
        self.position = Some(index);
        Page {
            index,
            result: self.results[index].clone(),
            navigation,
        }
    }
}

/// Ordinal prefix for the 0-based result index: "", "second ", "third ", "4th ", ...
pub fn ordinal_label(index: usize) -> String {
    match index + 1 {
        1 => String::new(),
        2 => "second ".to_string(),
        3 => "third ".to_string(),
        n => format!("{n}th "),
    }
}
