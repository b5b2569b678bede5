/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessPolicy, AuthService, TokenCodec};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let codec = TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.access_token_ttl_seconds,
        config.access_token_leeway_seconds,
    );

    Arc::new(AuthService::new(
        codec,
        AccessPolicy::standard(),
        config.user_lookup_timeout,
    ))
}
