//! Access token entity as persisted by the external issuance flow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Scopes;

/// Table the issuance flow writes access tokens into
pub const ACCESS_TOKEN_TABLE: &str = "provider_accesstoken";

/// An issued access token granting access to an owner's resources
///
/// Rows are created and rotated by the external provider. This service
/// only ever reads them, and deletes them on explicit revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Store surrogate key
    pub id: i64,

    /// Opaque bearer token string, unique across live rows
    pub token: String,

    /// Resource owner the token was issued for
    pub owner_id: Option<i64>,

    /// Client application the token was issued to
    pub application_id: Option<i64>,

    /// Instant after which the token is void
    pub expires: DateTime<Utc>,

    /// Set when the token has been explicitly invalidated
    pub invalid: bool,

    /// Capabilities granted by the token
    pub scope: Scopes,

    /// Row creation timestamp, maintained by the store
    pub created: DateTime<Utc>,

    /// Row update timestamp, maintained by the store
    pub updated: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a new access token record
    ///
    /// # Arguments
    ///
    /// * `token` - The opaque token string
    /// * `owner_id` - The resource owner, if any
    /// * `expires` - Expiration instant
    /// * `scope` - Granted scopes
    ///
    /// # Returns
    ///
    /// A live (not invalidated) `AccessToken` with audit timestamps set to now
    pub fn new(
        token: impl Into<String>,
        owner_id: Option<i64>,
        expires: DateTime<Utc>,
        scope: Scopes,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: 0,
            token: token.into(),
            owner_id,
            application_id: None,
            expires,
            invalid: false,
            scope,
            created: now,
            updated: now,
        }
    }

    /// Checks if the token has expired against the wall clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the token has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }

    /// Checks if the token grants every scope in `required`
    ///
    /// An empty requirement disables the check.
    pub fn allows_scopes(&self, required: &Scopes) -> bool {
        required.is_empty() || self.scope.is_superset_of(required)
    }

    /// Checks if the token is usable for the `required` scopes right now
    ///
    /// A token is valid if it hasn't been invalidated, hasn't expired,
    /// and grants every required scope.
    pub fn is_valid(&self, required: &Scopes) -> bool {
        self.is_valid_at(required, Utc::now())
    }

    /// Same as [`AccessToken::is_valid`] evaluated at `now`
    pub fn is_valid_at(&self, required: &Scopes, now: DateTime<Utc>) -> bool {
        !self.invalid && !self.is_expired_at(now) && self.allows_scopes(required)
    }

    /// Gets the time remaining until expiration
    ///
    /// # Returns
    ///
    /// A `Duration` representing the time until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires > now {
            self.expires - now
        } else {
            Duration::zero()
        }
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}
