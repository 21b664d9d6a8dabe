//! In-memory counter store for single-process deployments.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::CounterStore;

#[derive(Debug, Clone)]
struct Entry {
    value: i64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Concurrent map with lazy per-key expiry.
///
/// The DashMap entry API holds the shard lock for the whole read-modify-write,
/// which is what makes `increment` atomic across workers in one process.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries whose window has passed. Expiry is otherwise lazy, so
    /// long-idle keys linger until the next purge.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl CounterStore for MemoryStore {
    fn increment(&self, key: &str, ttl: Duration) -> u64 {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry {
                value: 0,
                expires_at: Some(now + ttl),
            });
        if entry.is_expired(now) {
            // Window rolled over: fresh count, fresh expiry.
            entry.value = 1;
            entry.expires_at = Some(now + ttl);
        } else {
            entry.value += 1;
        }
        entry.value.max(0) as u64
    }

    fn get(&self, key: &str) -> Option<i64> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value)
    }

    fn set(&self, key: &str, value: i64, ttl: Option<Duration>) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: ttl.map(|t| Instant::now() + t),
            },
        );
    }
}
