//! Unit tests for mock access token repository implementation

use chrono::{Duration, Utc};

use crate::domain::entities::AccessToken;
use crate::domain::value_objects::Scopes;
use crate::errors::StoreError;
use crate::repositories::access_token::{AccessTokenRepository, MockAccessTokenRepository};

fn token(value: &str, expires_in: Duration) -> AccessToken {
    AccessToken::new(value, Some(1), Utc::now() + expires_in, Scopes::new())
}

#[tokio::test]
async fn test_find_active_returns_live_row() {
    let repo = MockAccessTokenRepository::with_tokens([token("abc", Duration::hours(1))]);

    let found = repo.find_active("abc", Utc::now()).await.unwrap();
    assert_eq!(found.map(|t| t.token), Some("abc".to_string()));
    assert_eq!(repo.lookup_count(), 1);
}

#[tokio::test]
async fn test_find_active_filters_expired_rows() {
    let repo = MockAccessTokenRepository::with_tokens([token("xyz", -Duration::hours(1))]);

    let found = repo.find_active("xyz", Utc::now()).await.unwrap();
    assert!(found.is_none());
    // Row is still physically present
    assert!(repo.contains("xyz").await);
}

#[tokio::test]
async fn test_find_active_filters_invalidated_rows() {
    let mut row = token("abc", Duration::hours(1));
    row.invalid = true;
    let repo = MockAccessTokenRepository::with_tokens([row]);

    assert!(repo.find_active("abc", Utc::now()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_active_is_exact_match() {
    let repo = MockAccessTokenRepository::with_tokens([token("abc", Duration::hours(1))]);

    assert!(repo.find_active("ABC", Utc::now()).await.unwrap().is_none());
    assert!(repo.find_active("abc ", Utc::now()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_by_token() {
    let repo = MockAccessTokenRepository::new();
    repo.insert(token("abc", Duration::hours(1))).await;

    assert!(repo.delete_by_token("abc").await.unwrap());
    assert!(!repo.contains("abc").await);

    // Second delete finds nothing
    assert!(!repo.delete_by_token("abc").await.unwrap());
    assert_eq!(repo.delete_count(), 2);
}

#[tokio::test]
async fn test_injected_failure_and_recovery() {
    let repo = MockAccessTokenRepository::with_tokens([token("abc", Duration::hours(1))]);
    repo.fail_with(StoreError::Unavailable {
        message: "connection refused".to_string(),
    });

    assert!(repo.find_active("abc", Utc::now()).await.is_err());
    assert!(repo.health_check().await.is_err());

    repo.recover();
    assert!(repo.find_active("abc", Utc::now()).await.unwrap().is_some());
}
