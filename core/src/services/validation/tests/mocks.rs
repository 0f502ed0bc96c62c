//! Mock implementations for testing the token validator

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::AccessToken;
use crate::errors::CacheError;
use crate::services::validation::traits::TokenCache;
use crate::services::validation::InMemoryTokenCache;

// Cache whose every call fails, as an unreachable Redis would
pub struct BrokenCache {
    pub calls: AtomicUsize,
}

impl BrokenCache {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TokenCache for BrokenCache {
    async fn get(&self, _token: &str) -> Result<Option<AccessToken>, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::new("connection refused"))
    }

    async fn put(&self, _record: &AccessToken, _ttl: Duration) -> Result<bool, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::new("connection refused"))
    }

    async fn tombstone(&self, _token: &str, _hold: Duration) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::new("connection refused"))
    }
}

// In-memory cache that records the TTL of every put
pub struct RecordingCache {
    pub inner: InMemoryTokenCache,
    pub ttls: Mutex<Vec<Duration>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: InMemoryTokenCache::new(),
            ttls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_ttls(&self) -> Vec<Duration> {
        self.ttls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenCache for RecordingCache {
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError> {
        self.inner.get(token).await
    }

    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError> {
        self.ttls.lock().unwrap().push(ttl);
        self.inner.put(record, ttl).await
    }

    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError> {
        self.inner.tombstone(token, hold).await
    }
}

// In-memory cache whose writes land only after a delay, as a congested
// Redis link would deliver them
pub struct SlowPutCache {
    pub inner: InMemoryTokenCache,
    pub delay: Duration,
}

impl SlowPutCache {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryTokenCache::new(),
            delay,
        }
    }
}

#[async_trait]
impl TokenCache for SlowPutCache {
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError> {
        self.inner.get(token).await
    }

    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(record, ttl).await
    }

    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError> {
        self.inner.tombstone(token, hold).await
    }
}

// Cache that accepts calls and never answers
pub struct HungCache {
    pub calls: AtomicUsize,
}

impl HungCache {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    async fn hang(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}

#[async_trait]
impl TokenCache for HungCache {
    async fn get(&self, _token: &str) -> Result<Option<AccessToken>, CacheError> {
        self.hang().await;
        Ok(None)
    }

    async fn put(&self, _record: &AccessToken, _ttl: Duration) -> Result<bool, CacheError> {
        self.hang().await;
        Ok(true)
    }

    async fn tombstone(&self, _token: &str, _hold: Duration) -> Result<(), CacheError> {
        self.hang().await;
        Ok(())
    }
}

// Cache whose tombstone writes fail a fixed number of times before succeeding
pub struct FlakyTombstoneCache {
    pub inner: InMemoryTokenCache,
    pub failures_left: AtomicUsize,
}

impl FlakyTombstoneCache {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: InMemoryTokenCache::new(),
            failures_left: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl TokenCache for FlakyTombstoneCache {
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError> {
        self.inner.get(token).await
    }

    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError> {
        self.inner.put(record, ttl).await
    }

    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(CacheError::new("write refused"));
        }
        self.inner.tombstone(token, hold).await
    }
}
