//! Process-local validity cache

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::entities::AccessToken;
use crate::errors::CacheError;

use super::traits::TokenCache;

#[derive(Clone)]
enum Slot {
    Live(AccessToken),
    Revoked,
}

#[derive(Clone)]
struct CacheEntry {
    slot: Slot,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// In-memory `TokenCache` honouring per-entry TTLs
///
/// Expired entries are dropped lazily on read; `purge_expired` sweeps the
/// whole map.
#[derive(Clone, Default)]
pub struct InMemoryTokenCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, tombstones and expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remaining TTL of the live entry for `token`
    pub async fn ttl(&self, token: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        match entries.get(token) {
            Some(CacheEntry {
                slot: Slot::Live(_),
                expires_at,
            }) => expires_at.checked_duration_since(Instant::now()),
            _ => None,
        }
    }

    /// Whether `token` is currently fenced off by a revocation
    pub async fn is_tombstoned(&self, token: &str) -> bool {
        let now = Instant::now();
        self.entries.read().await.get(token).is_some_and(|entry| {
            matches!(entry.slot, Slot::Revoked) && !entry.is_expired(now)
        })
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                Some(entry) if !entry.is_expired(Instant::now()) => {
                    return Ok(match &entry.slot {
                        Slot::Live(record) => Some(record.clone()),
                        Slot::Revoked => None,
                    });
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // expired: drop it under the write lock, re-checking in case it was refreshed
        let mut entries = self.entries.write().await;
        if entries
            .get(token)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(token);
        }
        Ok(None)
    }

    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError> {
        if ttl.is_zero() {
            return Ok(false);
        }

        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let fenced = entries.get(&record.token).is_some_and(|entry| {
            matches!(entry.slot, Slot::Revoked) && !entry.is_expired(now)
        });
        if fenced {
            return Ok(false);
        }

        entries.insert(
            record.token.clone(),
            CacheEntry {
                slot: Slot::Live(record.clone()),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError> {
        self.entries.write().await.insert(
            token.to_string(),
            CacheEntry {
                slot: Slot::Revoked,
                expires_at: Instant::now() + hold,
            },
        );
        Ok(())
    }
}
