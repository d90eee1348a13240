//! In-memory remote backend
//!
//! Implements the remote command subset in process memory. `SCAN` cursors are
//! insertion sequence numbers, so deleting keys between pages never makes a
//! scan skip a surviving key. Expiry is checked lazily against
//! `Instant::now()`, and the token bucket script is emulated with
//! [`BucketState`] under the same lock as the key space, which makes it
//! atomic in the same sense the server-side script is.

use async_trait::async_trait;
use courtside_domain::error::{Error, Result};
use courtside_domain::ports::{RemoteBackend, ScanPage};
use courtside_domain::{BucketState, CacheEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Slot {
    seq: u64,
    entry: CacheEntry,
}

#[derive(Debug, Default)]
struct Keyspace {
    strings: HashMap<String, Slot>,
    buckets: HashMap<String, (BucketState, Option<Instant>)>,
    next_seq: u64,
}

impl Keyspace {
    fn live(&self, key: &str, now: Instant) -> Option<&CacheEntry> {
        self.strings
            .get(key)
            .map(|slot| &slot.entry)
            .filter(|entry| !entry.is_expired_at(now))
    }

    // Removes the key and reports whether it held a live value
    fn remove_live(&mut self, key: &str, now: Instant) -> bool {
        self.strings
            .remove(key)
            .is_some_and(|slot| !slot.entry.is_expired_at(now))
    }
}

/// Working remote backend held in process memory
#[derive(Debug)]
pub struct MemoryRemoteBackend {
    keyspace: Mutex<Keyspace>,
    available: AtomicBool,
    commands: AtomicUsize,
}

impl Default for MemoryRemoteBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRemoteBackend {
    /// Create an empty, available backend
    pub fn new() -> Self {
        Self {
            keyspace: Mutex::new(Keyspace::default()),
            available: AtomicBool::new(true),
            commands: AtomicUsize::new(0),
        }
    }

    /// Simulate an outage (`false`) or a recovery (`true`)
    ///
    /// Stored data survives an outage.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether commands currently succeed
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of commands received, including failed ones
    pub fn commands(&self) -> usize {
        self.commands.load(Ordering::Relaxed)
    }

    /// Read a string key directly, bypassing availability
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock()
            .live(key, Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Read a bucket directly, bypassing availability
    pub fn bucket(&self, key: &str) -> Option<BucketState> {
        let now = Instant::now();
        self.lock()
            .buckets
            .get(key)
            .filter(|(_, expires_at)| expires_at.is_none_or(|at| now < at))
            .map(|(state, _)| *state)
    }

    /// Number of live string keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .strings
            .values()
            .filter(|slot| !slot.entry.is_expired_at(now))
            .count()
    }

    /// Check if no live string key is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Keyspace> {
        self.keyspace.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, command: &str) -> Result<()> {
        self.commands.fetch_add(1, Ordering::Relaxed);
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::remote_unavailable(format!(
                "{} failed: backend marked unavailable",
                command
            )))
        }
    }
}

#[async_trait]
impl RemoteBackend for MemoryRemoteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check("GET")?;
        let now = Instant::now();
        let mut keyspace = self.lock();
        let value = keyspace.live(key, now).map(|entry| entry.value.clone());
        if value.is_none() {
            keyspace.strings.remove(key);
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.check("SET")?;
        let now = Instant::now();
        let entry = CacheEntry::created_at(value, ttl, now);
        let mut keyspace = self.lock();
        let live_seq = keyspace
            .strings
            .get(key)
            .filter(|slot| !slot.entry.is_expired_at(now))
            .map(|slot| slot.seq);
        let seq = match live_seq {
            Some(seq) => seq,
            None => {
                keyspace.next_seq += 1;
                keyspace.next_seq
            }
        };
        keyspace.strings.insert(key.to_string(), Slot { seq, entry });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.check("DEL")?;
        let now = Instant::now();
        let mut keyspace = self.lock();
        let string = keyspace.remove_live(key, now);
        let bucket = keyspace.buckets.remove(key).is_some();
        Ok(string || bucket)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        self.check("SCAN")?;
        let now = Instant::now();
        let keyspace = self.lock();

        let mut pending: Vec<(u64, &String)> = keyspace
            .strings
            .iter()
            .filter(|(_, slot)| slot.seq >= cursor && !slot.entry.is_expired_at(now))
            .map(|(key, slot)| (slot.seq, key))
            .collect();
        pending.sort_unstable_by_key(|(seq, _)| *seq);

        let batch = count.max(1);
        let next = pending.get(batch).map_or(0, |(seq, _)| *seq);
        let keys = pending
            .into_iter()
            .take(batch)
            .filter(|(_, key)| glob_match(pattern, key))
            .map(|(_, key)| key.clone())
            .collect();
        Ok(ScanPage { cursor: next, keys })
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        self.check("DEL")?;
        let now = Instant::now();
        let mut keyspace = self.lock();
        Ok(keys
            .iter()
            .filter(|key| keyspace.remove_live(key, now))
            .count())
    }

    async fn eval_token_bucket(
        &self,
        key: &str,
        now: f64,
        rate: f64,
        amount: f64,
        idle_expiry_secs: u64,
    ) -> Result<bool> {
        self.check("EVALSHA")?;
        let instant = Instant::now();
        let mut keyspace = self.lock();
        let state = match keyspace.buckets.get(key) {
            Some((state, expires_at)) if expires_at.is_none_or(|at| instant < at) => *state,
            _ => BucketState::full(rate, now),
        };
        let mut state = state;
        let allowed = state.refill_and_take(now, rate, amount);
        let expires_at = instant.checked_add(Duration::from_secs(idle_expiry_secs));
        keyspace.buckets.insert(key.to_string(), (state, expires_at));
        Ok(allowed)
    }

    async fn ping(&self) -> Result<()> {
        self.check("PING")
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Redis-style glob match supporting `*`, `?` and backslash escapes
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_from(&pattern, &text)
}

fn glob_match_from(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| glob_match_from(rest, &text[skip..])),
        Some(('?', rest)) => !text.is_empty() && glob_match_from(rest, &text[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == Some(&rest[0]) && glob_match_from(&rest[1..], &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && glob_match_from(rest, &text[1..]),
    }
}
