//! Monotonic identifier source shared by the stores.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Hands out strictly increasing identifiers.
///
/// Each value is `max(previous + 1, now_in_millis)`: identifiers read like
/// creation timestamps, yet two calls inside the same millisecond (or from
/// different threads) never collide.
#[derive(Debug)]
pub struct IdentityGenerator {
    last: AtomicU64,
    clock: fn() -> u64,
}

impl IdentityGenerator {
    /// Generator seeded from the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
            clock: wall_clock_millis,
        }
    }

    /// Generator that ignores the clock and counts up from `start`.
    ///
    /// The first call to [`next`](Self::next) returns `start` (at least 1).
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            last: AtomicU64::new(start.saturating_sub(1)),
            clock: || 0,
        }
    }

    /// Produce the next identifier.
    pub fn next(&self) -> u64 {
        let now = (self.clock)();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = current.saturating_add(1).max(now);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => current = observed,
            }
        }
    }

    /// Make sure every later [`next`](Self::next) value is greater than `id`.
    ///
    /// Used when identifiers are installed from outside the generator.
    pub fn reserve_through(&self, id: u64) {
        self.last.fetch_max(id, Ordering::AcqRel);
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn wall_clock_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn rapid_calls_never_collide() {
        let ids = IdentityGenerator::new();
        let mut previous = ids.next();
        for _ in 0..10_000 {
            let next = ids.next();
            assert!(next > previous, "{next} should follow {previous}");
            previous = next;
        }
    }

    #[test]
    fn clock_seeded_ids_look_like_timestamps() {
        let before = wall_clock_millis();
        let id = IdentityGenerator::new().next();
        assert!(id >= before, "id {id} should not predate {before}");
    }

    #[test]
    fn counter_starts_where_asked() {
        let ids = IdentityGenerator::starting_at(1);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let ids = IdentityGenerator::starting_at(1);
        ids.reserve_through(5);
        assert_eq!(ids.next(), 6);

        // Reserving below the high-water mark changes nothing.
        ids.reserve_through(2);
        assert_eq!(ids.next(), 7);
    }

    #[test]
    fn concurrent_calls_stay_unique() {
        let ids = Arc::new(IdentityGenerator::new());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..1_000).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for worker in workers {
            for id in worker.join().expect("worker panicked") {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 8_000);
    }
}
