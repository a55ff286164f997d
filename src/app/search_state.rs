//! Debounced search input.
//!
//! [SearchCoordinator] sits between raw keystrokes and the [SortFilterEngine]. Each keystroke
//! pushes the deadline out by [SEARCH_DEBOUNCE]; the query is only applied once input has been
//! quiet that long. Clearing the search is applied right away.
//!
//! The coordinator doesn't own a timer. The owner's event loop calls [tick](SearchCoordinator::tick)
//! with the current time, the same way it polls worker responses.

use crate::app::SortFilterEngine;
use crate::core::Entry;

use std::time::{Duration, Instant};

/// Quiet period before a typed query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug, Default)]
pub struct SearchCoordinator {
    pending: Option<String>,
    debounce: Option<Instant>,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    // Getters / Accessors

    /// When the pending query will be applied, if one is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_some()
    }

    /// Handles one raw input event.
    ///
    /// The input is trimmed and lower-cased. A non-empty query replaces whatever was pending and
    /// restarts the quiet period. An empty one cancels the pending query and re-projects
    /// immediately.
    ///
    /// # Returns
    /// The new projection when the input was applied right away, `None` when it was scheduled.
    pub fn input<'e>(
        &mut self,
        raw: &str,
        now: Instant,
        engine: &'e mut SortFilterEngine,
    ) -> Option<Vec<&'e Entry>> {
        let query = raw.trim().to_lowercase();

        if query.is_empty() {
            self.cancel();
            engine.set_query(String::new());
            return Some(engine.project());
        }

        self.pending = Some(query);
        self.debounce = Some(now + SEARCH_DEBOUNCE);
        None
    }

    /// Applies the pending query once its quiet period is over.
    ///
    /// # Returns
    /// The new projection if a query was applied, `None` if nothing was due or the settled query
    /// is the one already applied.
    pub fn tick<'e>(
        &mut self,
        now: Instant,
        engine: &'e mut SortFilterEngine,
    ) -> Option<Vec<&'e Entry>> {
        let until = self.debounce?;
        if now < until {
            return None;
        }
        self.debounce = None;

        let query = self.pending.take()?;
        if query == engine.query() {
            return None;
        }

        tracing::debug!(%query, "search settled");
        engine.set_query(query);
        Some(engine.project())
    }

    /// Drops the pending query without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.debounce = None;
    }
}
