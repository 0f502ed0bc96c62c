//! Unit tests for the Redis token cache encoding

use chrono::{Duration as ChronoDuration, Utc};

use tv_core::domain::entities::AccessToken;
use tv_core::domain::value_objects::Scopes;

use crate::cache::token_cache::TOMBSTONE;

#[test]
fn test_tombstone_is_not_a_record() {
    assert!(serde_json::from_str::<AccessToken>(TOMBSTONE).is_err());
}

#[test]
fn test_encoded_record_never_equals_tombstone() {
    let record = AccessToken::new(
        TOMBSTONE,
        None,
        Utc::now() + ChronoDuration::hours(1),
        Scopes::new(),
    );

    let payload = serde_json::to_string(&record).unwrap();

    assert_ne!(payload, TOMBSTONE);
    assert!(payload.starts_with('{'));
}
