//! Application state

use std::sync::Arc;

use crate::auth::TokenService;
use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::db::Stores;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Credential and resource stores
    pub stores: Stores,
    /// Token issuer/verifier
    pub tokens: TokenService,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(stores: Stores, config: Config) -> Self {
        Self {
            tokens: TokenService::new(&config.jwt_secret),
            stores,
            rate_limiter: RateLimiter::new(),
            config: Arc::new(config),
        }
    }
}
