use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::loader::Loaded;
use crate::locale::Locale;

/// Default validity window of a loaded snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Clock – injected time source
// ---------------------------------------------------------------------------

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// RecordCache – per-locale snapshot with expiry
// ---------------------------------------------------------------------------

struct Entry {
    loaded: Loaded,
    fetched_at: Instant,
}

/// Caches one [`Loaded`] snapshot per locale for `ttl`.
pub struct RecordCache {
    ttl: Duration,
    clock: Box<dyn Clock>,
    entries: HashMap<Locale, Entry>,
}

impl RecordCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Box<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    /// Return the cached snapshot for `locale` while it is fresh, otherwise
    /// run `load` and remember its result. Failed loads are cached too.
    pub fn get_or_load<F>(&mut self, locale: Locale, load: F) -> Loaded
    where
        F: FnOnce() -> Loaded,
    {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(&locale) {
            if now.saturating_duration_since(entry.fetched_at) < self.ttl {
                log::debug!("Cache hit for {locale}");
                return entry.loaded.clone();
            }
            log::debug!("Cache entry for {locale} expired");
        } else {
            log::debug!("Cache miss for {locale}");
        }

        let loaded = load();
        self.entries.insert(
            locale,
            Entry {
                loaded: loaded.clone(),
                fetched_at: now,
            },
        );
        loaded
    }

    /// Drop the snapshot for one locale.
    pub fn invalidate(&mut self, locale: Locale) {
        self.entries.remove(&locale);
    }

    /// Drop every snapshot, e.g. after switching to another source.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
