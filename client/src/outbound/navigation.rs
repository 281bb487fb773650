//! In-process navigation backend with browser-like history semantics.

use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{Navigator, NavigatorError};

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    cursor: usize,
}

/// History of query strings standing in for a browser's session history.
///
/// Pushing while rewound drops the forward branch, exactly as a browser
/// does when navigating after going back.
pub struct MemoryNavigator {
    state: Mutex<History>,
}

impl MemoryNavigator {
    /// A history holding a single empty query.
    pub fn new() -> Self {
        Self::with_query("")
    }

    /// A history holding a single starting query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(History {
                entries: vec![query.into()],
                cursor: 0,
            }),
        }
    }

    /// Move back one entry; `false` when already at the oldest.
    pub fn back(&self) -> Result<bool, NavigatorError> {
        let mut history = self.lock_history()?;
        if history.cursor == 0 {
            return Ok(false);
        }
        history.cursor -= 1;
        Ok(true)
    }

    /// Move forward one entry; `false` when already at the newest.
    pub fn forward(&self) -> Result<bool, NavigatorError> {
        let mut history = self.lock_history()?;
        if history.cursor + 1 >= history.entries.len() {
            return Ok(false);
        }
        history.cursor += 1;
        Ok(true)
    }

    fn lock_history(&self) -> Result<MutexGuard<'_, History>, NavigatorError> {
        self.state
            .lock()
            .map_err(|_| NavigatorError::access("history lock poisoned"))
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryNavigator {
    fn query(&self) -> Result<String, NavigatorError> {
        let history = self.lock_history()?;
        history
            .entries
            .get(history.cursor)
            .cloned()
            .ok_or_else(|| NavigatorError::access("history cursor out of range"))
    }

    fn push_query(&self, query: &str) -> Result<(), NavigatorError> {
        let mut history = self.lock_history()?;
        let keep = history.cursor + 1;
        history.entries.truncate(keep);
        history.entries.push(query.to_owned());
        history.cursor += 1;
        Ok(())
    }
}
