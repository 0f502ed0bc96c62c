//! MySQL implementation of the AccessTokenRepository trait.
//!
//! Reads the `provider_accesstoken` table written by the external OAuth
//! provider. Lookups are a single indexed point query; revocation is a hard
//! delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use tv_core::domain::entities::AccessToken;
use tv_core::domain::value_objects::Scopes;
use tv_core::errors::StoreError;
use tv_core::repositories::AccessTokenRepository;

use crate::database::DatabasePool;

pub(crate) const FIND_ACTIVE_SQL: &str = r#"
    SELECT id, token, user_id, application_id, expires, invalid, scope, created, updated
    FROM provider_accesstoken
    WHERE token = ? AND invalid = FALSE AND expires > ?
    LIMIT 1
"#;

pub(crate) const DELETE_SQL: &str = "DELETE FROM provider_accesstoken WHERE token = ?";

/// MySQL implementation of AccessTokenRepository
pub struct MySqlAccessTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccessTokenRepository {
    /// Create a new MySQL access token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create a repository sharing an existing `DatabasePool`
    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone())
    }

    /// Convert a database row to an AccessToken entity
    fn row_to_token(row: &MySqlRow) -> Result<AccessToken, StoreError> {
        let scope: Option<String> = row.try_get("scope").map_err(map_sqlx_error)?;

        Ok(AccessToken {
            id: row.try_get("id").map_err(map_sqlx_error)?,
            token: row.try_get("token").map_err(map_sqlx_error)?,
            owner_id: row.try_get("user_id").map_err(map_sqlx_error)?,
            application_id: row.try_get("application_id").map_err(map_sqlx_error)?,
            expires: row
                .try_get::<DateTime<Utc>, _>("expires")
                .map_err(map_sqlx_error)?,
            invalid: row.try_get("invalid").map_err(map_sqlx_error)?,
            scope: Scopes::parse(scope.as_deref().unwrap_or_default()),
            created: row
                .try_get::<DateTime<Utc>, _>("created")
                .map_err(map_sqlx_error)?,
            updated: row
                .try_get::<DateTime<Utc>, _>("updated")
                .map_err(map_sqlx_error)?,
        })
    }
}

#[async_trait]
impl AccessTokenRepository for MySqlAccessTokenRepository {
    async fn find_active(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccessToken>, StoreError> {
        let result = sqlx::query(FIND_ACTIVE_SQL)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to query access token");
                map_sqlx_error(e)
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(DELETE_SQL)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to delete access token");
                map_sqlx_error(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// Classify a SQLx error: undecodable rows are malformed data, everything
/// else means the store could not answer.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::MalformedRow {
            message: err.to_string(),
        },
        other => StoreError::Unavailable {
            message: other.to_string(),
        },
    }
}
