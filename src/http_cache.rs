use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::football_api::Endpoint;

/// In-memory response store keyed by endpoint and its parameters.
///
/// Every entry carries its own expiry instant. Nothing is written to disk and
/// nothing is invalidated except by time.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<Endpoint, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: Value,
    expires_at: Instant,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Endpoint, now: Instant) -> Option<&Value> {
        let entry = self.entries.get(key)?;
        if now >= entry.expires_at {
            return None;
        }
        Some(&entry.body)
    }

    pub fn insert(&mut self, key: Endpoint, body: Value, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            body,
            expires_at: now + ttl,
        };
        self.entries.insert(key, entry);
    }

    /// Drops entries whose TTL has run out; returns how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
