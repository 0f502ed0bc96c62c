//! Main token validator implementation

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::AccessToken;
use crate::domain::value_objects::Scopes;
use crate::errors::{CacheError, StoreError, ValidationError, ValidationResult};
use crate::repositories::AccessTokenRepository;

use super::config::TokenValidatorConfig;
use super::traits::TokenCache;

/// Validates bearer tokens against the external token store
///
/// Holds an injected store handle and an optional validity cache; both are
/// shared, so one validator serves every concurrent call.
#[derive(Clone)]
pub struct TokenValidator {
    /// Token store, typically backed by a connection pool
    repository: Arc<dyn AccessTokenRepository>,
    /// Optional read-through cache
    cache: Option<Arc<dyn TokenCache>>,
    /// Validator configuration
    config: TokenValidatorConfig,
}

impl TokenValidator {
    /// Create a new token validator without a cache
    ///
    /// # Arguments
    ///
    /// * `repository` - Token store implementation
    /// * `config` - Validator configuration
    pub fn new(repository: Arc<dyn AccessTokenRepository>, config: TokenValidatorConfig) -> Self {
        Self {
            repository,
            cache: None,
            config,
        }
    }

    /// Attach a validity cache
    pub fn with_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &TokenValidatorConfig {
        &self.config
    }

    /// Look up a live token by its exact string
    ///
    /// This method:
    /// 1. Rejects an empty token without touching the store
    /// 2. Serves a cached record if it is still unexpired; a cache that
    ///    fails or stalls past the cache timeout is skipped
    /// 3. Otherwise queries the store for a row that is not invalidated
    ///    and not expired, bounded by the store timeout
    /// 4. Re-checks expiry locally to absorb clock skew with the store
    /// 5. Caches the record for no longer than its remaining lifetime
    ///
    /// # Returns
    ///
    /// * `Ok(AccessToken)` - The live token
    /// * `Err(ValidationError::NotFound)` - No live row matches
    /// * `Err(ValidationError::StoreUnavailable)` - The store could not answer
    pub async fn lookup(&self, token: &str) -> ValidationResult<AccessToken> {
        if token.is_empty() {
            return Err(ValidationError::MissingInput);
        }

        if let Some(record) = self.cached(token).await {
            return Ok(record);
        }

        let now = Utc::now();
        let found = self
            .bounded(self.repository.find_active(token, now))
            .await?;

        let Some(record) = found else {
            return Err(ValidationError::NotFound);
        };

        if record.token != token || !Self::is_valid(&record, &Scopes::new()) {
            tracing::warn!(
                token = %mask_token(token),
                expires = %record.expires,
                "Store returned a token that fails local validity checks"
            );
            return Err(ValidationError::NotFound);
        }

        self.remember(&record).await;
        Ok(record)
    }

    /// Check a record against the wall clock and the required scopes
    ///
    /// True iff the token is not invalidated, not expired, and `required`
    /// is empty or a subset of the granted scopes.
    pub fn is_valid(record: &AccessToken, required: &Scopes) -> bool {
        record.is_valid(required)
    }

    /// Look up a token and require it to grant `required`
    ///
    /// Library-level scope enforcement; the RPC surface does not use it.
    pub async fn validate(&self, token: &str, required: &Scopes) -> ValidationResult<AccessToken> {
        let record = self.lookup(token).await?;
        if !Self::is_valid(&record, required) {
            tracing::debug!(
                token = %mask_token(token),
                required = %required,
                granted = %record.scope,
                "Access token lacks required scopes"
            );
            return Err(ValidationError::InsufficientScope);
        }
        Ok(record)
    }

    /// Revoke a token by deleting its row and fencing off its cache entry
    ///
    /// The cache entry is replaced by a tombstone before the delete, so a
    /// lookup racing the revoke cannot re-cache the old record. If the
    /// tombstone cannot be written it is retried once after the delete.
    /// Idempotent: revoking an unknown token succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The token no longer exists in the store or the cache
    /// * `Err(ValidationError::StoreUnavailable)` - The delete failed
    /// * `Err(ValidationError::StaleCache)` - The row is gone but a cached
    ///   copy may still be served until its TTL runs out
    pub async fn revoke(&self, token: &str) -> ValidationResult<()> {
        if token.is_empty() {
            return Err(ValidationError::MissingInput);
        }

        let fenced = self.fence(token).await;

        let deleted = self.bounded(self.repository.delete_by_token(token)).await?;

        if let Err(first) = fenced {
            tracing::warn!(
                token = %mask_token(token),
                error = %first,
                "Failed to tombstone revoked token, retrying"
            );
            if let Err(e) = self.fence(token).await {
                tracing::error!(
                    token = %mask_token(token),
                    error = %e,
                    deleted = deleted,
                    "Revoked token may still be served from cache"
                );
                return Err(ValidationError::StaleCache(e));
            }
        }

        tracing::info!(
            token = %mask_token(token),
            deleted = deleted,
            event = "token_revoked",
            "Access token revoked"
        );
        Ok(())
    }

    /// Check that the token store is reachable
    pub async fn health_check(&self) -> ValidationResult<()> {
        self.bounded(self.repository.health_check()).await?;
        Ok(())
    }

    async fn cached(&self, token: &str) -> Option<AccessToken> {
        let cache = self.cache.as_ref()?;

        match self.cache_bounded(cache.get(token)).await {
            Ok(Some(record)) if record.token == token && Self::is_valid(&record, &Scopes::new()) => {
                tracing::debug!(token = %mask_token(token), "Access token served from cache");
                Some(record)
            }
            // stale entries are overwritten by the next put
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Token cache read failed, falling back to store");
                None
            }
        }
    }

    async fn remember(&self, record: &AccessToken) {
        let Some(cache) = &self.cache else {
            return;
        };

        let Some(ttl) = cache_ttl(record.expires, Utc::now(), self.config.cache_ttl) else {
            return;
        };

        match self.cache_bounded(cache.put(record, ttl)).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(token = %mask_token(&record.token), "Skipped caching a revoked token");
            }
            Err(e) => tracing::warn!(error = %e, "Failed to cache access token"),
        }
    }

    async fn fence(&self, token: &str) -> Result<(), CacheError> {
        match &self.cache {
            Some(cache) => {
                self.cache_bounded(cache.tombstone(token, self.config.tombstone_hold()))
                    .await
            }
            None => Ok(()),
        }
    }

    async fn cache_bounded<T, F>(&self, operation: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        let limit = self.config.cache_timeout;
        tokio::time::timeout(limit, operation)
            .await
            .unwrap_or_else(|_| {
                Err(CacheError::new(format!(
                    "call timed out after {}ms",
                    limit.as_millis()
                )))
            })
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let limit = self.config.store_timeout;
        match tokio::time::timeout(limit, operation).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(timeout_ms = limit.as_millis() as u64, "Token store call timed out");
                Err(StoreError::Timeout {
                    elapsed_ms: limit.as_millis() as u64,
                })
            }
        }
    }
}

/// TTL for a cache entry: the configured cap, shortened to the token's
/// remaining lifetime. `None` when the token has no lifetime left.
pub(crate) fn cache_ttl(expires: DateTime<Utc>, now: DateTime<Utc>, cap: Duration) -> Option<Duration> {
    let remaining = (expires - now).to_std().ok()?;
    let ttl = remaining.min(cap);
    (!ttl.is_zero()).then_some(ttl)
}

/// Shorten a token for logs
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}***", prefix)
}
