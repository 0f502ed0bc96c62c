//! Redis-backed validity cache
//!
//! Stores each live `AccessToken` as JSON under `<prefix>:<token>` with a
//! millisecond TTL chosen by the validator, so entries never outlive the
//! token they describe. A revoked token's key holds the `TOMBSTONE`
//! sentinel instead, which no JSON payload can equal.

use async_trait::async_trait;
use std::time::Duration;

use tv_core::domain::entities::AccessToken;
use tv_core::errors::CacheError;
use tv_core::services::TokenCache;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Value stored under a revoked token's key
pub const TOMBSTONE: &str = "revoked";

/// `TokenCache` over a shared Redis instance
#[derive(Clone)]
pub struct RedisTokenCache {
    client: RedisClient,
}

impl RedisTokenCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, token: &str) -> String {
        self.client.config().make_key(token)
    }

    /// Remaining TTL of the entry for `token`
    pub async fn ttl(&self, token: &str) -> Result<Option<Duration>, InfrastructureError> {
        self.client.ttl(&self.key(token)).await
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError> {
        let key = self.key(token);
        let Some(payload) = self.client.get(&key).await? else {
            return Ok(None);
        };
        if payload == TOMBSTONE {
            return Ok(None);
        }

        match serde_json::from_str::<AccessToken>(&payload) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable cache entry");
                self.client.delete(&key).await?;
                Err(InfrastructureError::Serialization(e).into())
            }
        }
    }

    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError> {
        if ttl.is_zero() {
            return Ok(false);
        }

        let payload = serde_json::to_string(record).map_err(InfrastructureError::from)?;
        let written = self
            .client
            .set_with_expiry_unless(&self.key(&record.token), &payload, ttl, TOMBSTONE)
            .await?;
        Ok(written)
    }

    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError> {
        self.client
            .set_with_expiry(&self.key(token), TOMBSTONE, hold)
            .await?;
        Ok(())
    }
}
