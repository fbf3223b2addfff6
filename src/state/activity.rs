//! Activity feed for the dashboard activity view.

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;

use crate::net::types::Activity;

const DEFAULT_RETENTION: usize = 100;

/// Activities held newest-first, deduplicated by id and capped so a
/// long-lived subscription cannot grow the view without bound.
#[derive(Debug)]
pub struct ActivityFeed {
    items: Vec<Activity>,
    retention: usize,
}

impl ActivityFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Feed keeping at most `retention` items (oldest dropped first).
    #[must_use]
    pub fn with_retention(retention: usize) -> Self {
        Self { items: Vec::new(), retention }
    }

    /// Install an initial query result, replacing anything held.
    pub fn replace(&mut self, items: Vec<Activity>) {
        self.items = items;
        self.items.truncate(self.retention);
    }

    /// Insert a subscription delivery at the front. Returns false when an
    /// item with the same id is already held.
    pub fn push(&mut self, activity: Activity) -> bool {
        if self.items.iter().any(|held| held.id == activity.id) {
            return false;
        }
        self.items.insert(0, activity);
        self.items.truncate(self.retention);
        true
    }

    #[must_use]
    pub fn items(&self) -> &[Activity] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}
