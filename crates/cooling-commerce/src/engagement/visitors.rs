//! Site visit counter.

use cooling_store::{keys, Slot, Store};
use tracing::warn;

use crate::error::CommerceError;

/// Count stored on the very first visit.
pub const INITIAL_VISITOR_COUNT: u64 = 278;

/// Visitor count, stored as a bare integer.
#[derive(Debug)]
pub struct VisitorCounter<S: Store> {
    slot: Slot<S, u64>,
}

impl<S: Store> VisitorCounter<S> {
    pub fn new(store: S) -> Self {
        Self {
            slot: Slot::new(store, keys::VISITOR_COUNT),
        }
    }

    /// Count a page load and return the new total.
    ///
    /// Without a readable stored count the counter starts at
    /// [`INITIAL_VISITOR_COUNT`].
    pub fn record_visit(&self) -> Result<u64, CommerceError> {
        let count = match self.slot.load() {
            Ok(Some(count)) => count.saturating_add(1),
            Ok(None) => INITIAL_VISITOR_COUNT,
            Err(e) => {
                warn!(error = %e, "visitor count unreadable, restarting");
                INITIAL_VISITOR_COUNT
            }
        };
        self.slot.save(&count)?;
        Ok(count)
    }

    /// The stored count, without recording a visit.
    pub fn current(&self) -> Option<u64> {
        self.slot.load().ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cooling_store::MemoryStore;

    #[test]
    fn test_first_visit_then_increment() {
        let store = MemoryStore::new();
        let counter = VisitorCounter::new(store.clone());
        assert_eq!(counter.current(), None);

        assert_eq!(counter.record_visit().unwrap(), 278);
        assert_eq!(counter.record_visit().unwrap(), 279);
        assert_eq!(store.get_raw(keys::VISITOR_COUNT).unwrap().unwrap(), "279");
    }

    #[test]
    fn test_existing_count_continues() {
        let store = MemoryStore::new();
        store.set_raw(keys::VISITOR_COUNT, "1041").unwrap();
        assert_eq!(VisitorCounter::new(store).record_visit().unwrap(), 1042);
    }

    #[test]
    fn test_garbage_restarts_count() {
        let store = MemoryStore::new();
        store.set_raw(keys::VISITOR_COUNT, "lots").unwrap();
        assert_eq!(VisitorCounter::new(store).record_visit().unwrap(), 278);
    }
}
