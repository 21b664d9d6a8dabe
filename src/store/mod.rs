//! Shared counter store subsystem.
//!
//! # Data Flow
//! ```text
//! security/rate_limit.rs ──┐
//!                          ├──▶ CounterStore (atomic increment / get / set)
//! security/log_integrity.rs┘          │
//!                                     ▼
//!                              memory.rs (DashMap, per-key expiry)
//! ```
//!
//! # Design Decisions
//! - Narrow trait so the stages never depend on a concrete store
//! - Increments are atomic at the store level, never read-then-write
//! - Each consumer owns a key namespace (`rate:` vs `integrity:`)

pub mod memory;

use std::time::Duration;

pub use memory::MemoryStore;

/// Key-value store with per-key expiry, shared by all request workers.
///
/// Implementations must make `increment` an atomic read-modify-write:
/// two concurrent increments on the same key must never observe the same
/// count. An expired key is indistinguishable from an absent one.
pub trait CounterStore: Send + Sync {
    /// Increment `key`, creating it with value 1 and `ttl` expiry when absent
    /// or expired. The expiry of a live key is left untouched (fixed window).
    /// Returns the post-increment count.
    fn increment(&self, key: &str, ttl: Duration) -> u64;

    /// Read a value. Expired keys read as `None`.
    fn get(&self, key: &str) -> Option<i64>;

    /// Write a value. `ttl = None` means the key never expires.
    fn set(&self, key: &str, value: i64, ttl: Option<Duration>);
}
