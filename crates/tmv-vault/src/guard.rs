//! Re-entrancy guard for in-flight moves.
//!
//! Moving a note makes the vault report changes for it, which would feed
//! straight back into the mover. Paths are registered when a relocation
//! starts and stay flagged until [`SETTLE_DELAY`] after it finishes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a path stays flagged after its relocation attempt completes.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Paths with a relocation in flight or settling.
///
/// `None` expiry means the attempt has not finished yet.
#[derive(Debug)]
pub struct MovingSet<C: Clock = SystemClock> {
    clock: C,
    delay: Duration,
    entries: HashMap<String, Option<Instant>>,
}

impl<C: Clock> MovingSet<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_delay(clock, SETTLE_DELAY)
    }

    #[must_use]
    pub fn with_delay(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            entries: HashMap::new(),
        }
    }

    /// Flag `path` as in flight.
    pub fn begin(&mut self, path: &str) {
        self.entries.insert(path.to_string(), None);
    }

    /// Start the settle window for `path`.
    pub fn settle(&mut self, path: &str) {
        let expiry = self.clock.now() + self.delay;
        self.entries.insert(path.to_string(), Some(expiry));
    }

    /// Whether events for `path` should be ignored right now.
    pub fn contains(&mut self, path: &str) -> bool {
        self.purge();
        self.entries.contains_key(path)
    }

    /// Number of flagged paths.
    pub fn len(&mut self) -> usize {
        self.purge();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    fn purge(&mut self) {
        let now = self.clock.now();
        self.entries
            .retain(|_, expiry| expiry.map_or(true, |at| now < at));
    }
}
