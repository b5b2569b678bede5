use std::time::Duration;

use chrono::Utc;

use crate::services::auth::token_codec::VerifiedToken;
use crate::services::auth::{AccessPolicy, TokenCodec, TokenError};

/// Process-wide, read-only authentication settings shared by every request.
///
/// Built once from `Config` (see `factory`) and handed to the request gate via `AppState`.
#[derive(Debug)]
pub struct AuthService {
    codec: TokenCodec,
    policy: AccessPolicy,
    user_lookup_timeout: Duration,
}

impl AuthService {
    pub fn new(codec: TokenCodec, policy: AccessPolicy, user_lookup_timeout: Duration) -> Self {
        Self {
            codec,
            policy,
            user_lookup_timeout,
        }
    }

    /// Verify against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.codec.verify(token, Utc::now().timestamp())
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn user_lookup_timeout(&self) -> Duration {
        self.user_lookup_timeout
    }
}
