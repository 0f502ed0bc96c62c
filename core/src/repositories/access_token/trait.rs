//! Token store interface consumed by the validator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::AccessToken;
use crate::errors::StoreError;

/// Read/delete access to the external access token table
///
/// The table is owned by the issuance flow. Implementations must be safe to
/// share across tasks (a connection pool, never a single shared cursor).
///
/// # Consistency
/// - Lookups and deletes are independent statements at the store's own
///   isolation level; a lookup racing a delete may observe either state
/// - A delete is a single atomic statement, so cancellation needs no cleanup
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Find a live token by its exact string
    ///
    /// Filtering happens in the query itself: only a row with
    /// `invalid = false` and `expires > now` is returned.
    ///
    /// # Arguments
    /// * `token` - The bearer token string, matched exactly
    /// * `now` - Reference instant for the expiration filter
    ///
    /// # Returns
    /// * `Ok(Some(AccessToken))` - A live row matched
    /// * `Ok(None)` - No live row for this token
    /// * `Err(StoreError)` - The store could not answer
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use tv_core::repositories::AccessTokenRepository;
    /// # async fn example(repo: &impl AccessTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_active("abc", Utc::now()).await? {
    ///     Some(token) => println!("Token belongs to owner {:?}", token.owner_id),
    ///     None => println!("Token not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_active(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccessToken>, StoreError>;

    /// Delete the row for a token, whatever its state
    ///
    /// # Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No row existed
    /// * `Err(StoreError)` - Deletion failed
    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
