//! The Shared Store
//!
//! This module implements the in-memory store for linekv: a value table and
//! an expiration table behind one `RwLock`.
//!
//! ## Design Decisions
//!
//! 1. **Single lock**: every table access, read or write, goes through the
//!    same `RwLock`. One connection's SET and another's GET on the same key
//!    are mutually exclusive at operation granularity.
//! 2. **Independent rows**: a key's value and its expiration are separate
//!    table entries. `expire` happily writes an expiration row for a key
//!    with no value, and `delete` counts either row as presence.
//! 3. **Lazy expiry**: read paths that consult the deadline (`get`, `ttl`)
//!    remove both rows under the write lock when `now > expire_at`, so a
//!    subsequent command observes the key as absent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Remaining lifetime of a key as reported by [`Store::ttl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The key is absent, or was just evicted as expired. Wire form: `-2`.
    Missing,
    /// The key exists and never expires. Wire form: `-1`.
    NoExpiry,
    /// Seconds until the deadline. May be zero when expiry is imminent.
    Seconds(i64),
}

/// The two tables. Kept together so one lock guards both.
#[derive(Debug, Default)]
struct Tables {
    values: HashMap<String, String>,
    /// Absolute UNIX deadlines in seconds. A key with no row never expires.
    expirations: HashMap<String, i64>,
}

/// The shared key-value store.
///
/// Designed to be wrapped in an `Arc` and shared across all connection
/// handler tasks. All operations are thread-safe and hold the lock only for
/// O(1)-ish table edits, never across I/O.
///
/// # Example
///
/// ```
/// use linekv::storage::{Store, Ttl};
///
/// let store = Store::new();
/// store.set("name".into(), "Ada".into());
/// assert_eq!(store.get("name"), Some("Ada".to_string()));
///
/// store.set_with_ttl("session".into(), "abc123".into(), 60);
/// assert!(matches!(store.ttl("session"), Ttl::Seconds(s) if s <= 60));
/// ```
pub struct Store {
    tables: RwLock<Tables>,

    /// Statistics: total GET operations
    get_count: AtomicU64,

    /// Statistics: total SET operations (SET and SETEX)
    set_count: AtomicU64,

    /// Statistics: total DEL operations
    del_count: AtomicU64,

    /// Statistics: keys evicted by lazy expiry
    expired_count: AtomicU64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("keys", &self.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock seconds since the UNIX epoch.
fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
            expired_count: AtomicU64::new(0),
        }
    }

    /// Removes both rows for `key` if its deadline has passed.
    ///
    /// Must be called with the write lock held so the check and the removal
    /// are one atomic step.
    fn evict_if_expired(&self, tables: &mut Tables, key: &str, now: i64) -> bool {
        match tables.expirations.get(key) {
            Some(&deadline) if now > deadline => {
                tables.values.remove(key);
                tables.expirations.remove(key);
                self.expired_count.fetch_add(1, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }

    /// Stores `value` for `key`, overwriting any prior value.
    ///
    /// An existing expiration row is left untouched: re-setting a key that
    /// previously had a TTL leaves the old TTL in effect.
    pub fn set(&self, key: String, value: String) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let mut tables = self.tables.write().unwrap();
        tables.values.insert(key, value);
    }

    /// Stores `value` for `key` and sets its deadline to `now + ttl_secs`.
    pub fn set_with_ttl(&self, key: String, value: String, ttl_secs: u64) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let deadline = now_unix() + ttl_secs as i64;
        let mut tables = self.tables.write().unwrap();
        tables.values.insert(key.clone(), value);
        tables.expirations.insert(key, deadline);
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired. Expired keys
    /// are detected and removed on access (lazy expiry).
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let now = now_unix();

        // Fast path under the read lock for live keys.
        {
            let tables = self.tables.read().unwrap();
            match tables.expirations.get(key) {
                Some(&deadline) if now > deadline => {} // expired, fall through
                _ => return tables.values.get(key).cloned(),
            }
        }

        // Deadline has passed - take the write lock and re-check, so two
        // connections racing on the same expired key evict it exactly once.
        let mut tables = self.tables.write().unwrap();
        if self.evict_if_expired(&mut tables, key, now) {
            return None;
        }
        tables.values.get(key).cloned()
    }

    /// Checks whether a value row exists for `key`.
    ///
    /// Deliberately does not consult the expiration table, so an existence
    /// check alone can report `true` for a conceptually-expired key until a
    /// read path evicts it.
    pub fn exists(&self, key: &str) -> bool {
        let tables = self.tables.read().unwrap();
        tables.values.contains_key(key)
    }

    /// Returns all stored keys when `pattern` is exactly `*`.
    ///
    /// Any other pattern yields an empty list; no glob matching is
    /// implemented. The result is a snapshot taken at call time.
    pub fn keys(&self, pattern: &str) -> Vec<String> {
        if pattern != "*" {
            return Vec::new();
        }

        let tables = self.tables.read().unwrap();
        tables.values.keys().cloned().collect()
    }

    /// Reports the remaining lifetime of `key`.
    ///
    /// Evicts the key first if its deadline has passed, so the answer for an
    /// expired key is [`Ttl::Missing`] and the tables are left consistent.
    pub fn ttl(&self, key: &str) -> Ttl {
        let now = now_unix();
        let mut tables = self.tables.write().unwrap();

        if self.evict_if_expired(&mut tables, key, now) || !tables.values.contains_key(key) {
            return Ttl::Missing;
        }

        match tables.expirations.get(key) {
            Some(&deadline) => Ttl::Seconds(deadline - now),
            None => Ttl::NoExpiry,
        }
    }

    /// Sets or overwrites the deadline for `key` to `now + ttl_secs`.
    ///
    /// The value table is not consulted: expiring a key that holds no value
    /// writes a dangling expiration row.
    pub fn expire(&self, key: String, ttl_secs: u64) {
        let deadline = now_unix() + ttl_secs as i64;
        let mut tables = self.tables.write().unwrap();
        tables.expirations.insert(key, deadline);
    }

    /// Removes any expiration row for `key`. No-op if none exists.
    pub fn persist(&self, key: &str) {
        let mut tables = self.tables.write().unwrap();
        tables.expirations.remove(key);
    }

    /// Removes both rows for `key`.
    ///
    /// Returns `true` if either row existed.
    pub fn delete(&self, key: &str) -> bool {
        self.del_count.fetch_add(1, Ordering::Relaxed);

        let mut tables = self.tables.write().unwrap();
        let had_value = tables.values.remove(key).is_some();
        let had_expiry = tables.expirations.remove(key).is_some();
        had_value || had_expiry
    }

    /// Empties both tables in one critical section.
    pub fn flush_all(&self) {
        let mut tables = self.tables.write().unwrap();
        tables.values.clear();
        tables.expirations.clear();
    }

    /// Number of keys in the value table.
    pub fn len(&self) -> usize {
        let tables = self.tables.read().unwrap();
        tables.values.len()
    }

    /// Returns true if the value table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns operation counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
        }
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    /// Number of keys currently stored
    pub keys: u64,
    /// Total GET operations
    pub get_ops: u64,
    /// Total SET operations
    pub set_ops: u64,
    /// Total DEL operations
    pub del_ops: u64,
    /// Keys evicted by lazy expiry
    pub expired: u64,
}
