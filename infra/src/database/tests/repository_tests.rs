//! Unit tests for the MySQL access token repository that need no server

use chrono::Utc;
use std::time::Duration;

use tv_core::domain::entities::ACCESS_TOKEN_TABLE;
use tv_core::errors::StoreError;
use tv_core::repositories::AccessTokenRepository;
use tv_shared::config::DatabaseConfig;

use crate::database::mysql::access_token_repository_impl::{
    map_sqlx_error, DELETE_SQL, FIND_ACTIVE_SQL,
};
use crate::database::{DatabasePool, MySqlAccessTokenRepository};

#[test]
fn test_find_active_filters_live_rows() {
    assert!(FIND_ACTIVE_SQL.contains(&format!("FROM {}", ACCESS_TOKEN_TABLE)));
    assert!(FIND_ACTIVE_SQL.contains("token = ?"));
    assert!(FIND_ACTIVE_SQL.contains("invalid = FALSE"));
    assert!(FIND_ACTIVE_SQL.contains("expires > ?"));
    assert!(FIND_ACTIVE_SQL.contains("LIMIT 1"));
}

#[test]
fn test_delete_is_keyed_by_token() {
    assert_eq!(
        DELETE_SQL,
        format!("DELETE FROM {} WHERE token = ?", ACCESS_TOKEN_TABLE)
    );
}

#[test]
fn test_decode_errors_are_malformed_rows() {
    let err = map_sqlx_error(sqlx::Error::ColumnNotFound("expires".to_string()));
    assert!(matches!(err, StoreError::MalformedRow { .. }));
}

#[test]
fn test_connection_errors_are_unavailable() {
    assert!(matches!(
        map_sqlx_error(sqlx::Error::PoolTimedOut),
        StoreError::Unavailable { .. }
    ));
    assert!(matches!(
        map_sqlx_error(sqlx::Error::PoolClosed),
        StoreError::Unavailable { .. }
    ));
}

#[tokio::test]
async fn test_unreachable_store_is_unavailable() {
    let mut config = DatabaseConfig::new("mysql://root@127.0.0.1:1/provider");
    config.connect_timeout = 1;
    config.min_connections = 0;
    let pool = DatabasePool::new_lazy(config).unwrap();
    let repo = MySqlAccessTokenRepository::from_pool(&pool);

    let lookup = tokio::time::timeout(Duration::from_secs(10), repo.find_active("abc", Utc::now()))
        .await
        .unwrap();

    assert!(matches!(lookup, Err(StoreError::Unavailable { .. })));
}
