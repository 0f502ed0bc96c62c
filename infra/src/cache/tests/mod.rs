mod redis_client_tests;
mod token_cache_tests;
