//! Client-side entry id generation.

use crate::model::entry::EntryId;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh entry ids for newly created entries.
pub trait EntryIdGenerator {
    fn next_id(&self) -> EntryId;
}

/// Wall-clock millisecond ids, strictly increasing within one process.
#[derive(Debug, Default)]
pub struct ClockIdGenerator {
    last: AtomicI64,
}

impl ClockIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryIdGenerator for ClockIdGenerator {
    fn next_id(&self) -> EntryId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or_default();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return EntryId(candidate),
                Err(observed) => last = observed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockIdGenerator, EntryIdGenerator};

    #[test]
    fn ids_are_strictly_increasing_within_same_millisecond() {
        let ids = ClockIdGenerator::new();
        let mut previous = ids.next_id();
        for _ in 0..1_000 {
            let next = ids.next_id();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn ids_track_wall_clock() {
        let id = ClockIdGenerator::new().next_id();
        assert!(id.get() > 1_600_000_000_000);
    }
}
