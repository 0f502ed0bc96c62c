//! In-memory implementation of AccessTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::AccessToken;
use crate::errors::StoreError;

use super::r#trait::AccessTokenRepository;

/// Mock token store for testing
///
/// Applies the same live-row filter as the SQL store and counts every call,
/// so tests can assert that a path never reached the store.
#[derive(Default)]
pub struct MockAccessTokenRepository {
    tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
    lookups: AtomicUsize,
    deletes: AtomicUsize,
    failure: Mutex<Option<StoreError>>,
    latency: Mutex<Option<Duration>>,
}

impl MockAccessTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository seeded with `tokens`
    pub fn with_tokens(tokens: impl IntoIterator<Item = AccessToken>) -> Self {
        let map = tokens
            .into_iter()
            .map(|token| (token.token.clone(), token))
            .collect();

        Self {
            tokens: Arc::new(RwLock::new(map)),
            ..Self::default()
        }
    }

    /// Insert or replace a row
    pub async fn insert(&self, token: AccessToken) {
        self.tokens.write().await.insert(token.token.clone(), token);
    }

    /// Whether a row exists for `token`, regardless of its state
    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.read().await.contains_key(token)
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Stop failing calls
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Delay every subsequent call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Number of `find_active` calls received
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_token` calls received
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    async fn simulate_store(&self) -> Result<(), StoreError> {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccessTokenRepository for MockAccessTokenRepository {
    async fn find_active(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccessToken>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.simulate_store().await?;

        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(token)
            .filter(|row| !row.invalid && row.expires > now)
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.simulate_store().await?;

        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.simulate_store().await
    }
}
