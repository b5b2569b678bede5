use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by bearer-token verification.
///
/// The request gate downgrades every variant to "anonymous"; the variant is only
/// used for logging and never reaches the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature verification failed")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Access token claims (HS256). Roles are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// What a successfully verified token tells us: only the subject and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// HS256 access-token codec.
///
/// - Key material is never printable via Debug.
/// - Expiry is checked against the caller's `now`, not jsonwebtoken's clock.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
    leeway_seconds: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl_seconds: i64, leeway_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
            leeway_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a token for `username`, valid from `now` for the configured TTL.
    ///
    /// There is no login endpoint in this service; this exists for tests and local tooling.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn issue(&self, username: &str, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = AccessTokenClaims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify signature, required claims and expiry.
    ///
    /// Pure over `(token, now)` and the immutable key: verifying the same token
    /// twice at the same instant yields the same result.
    pub fn verify(&self, token: &str, now: i64) -> Result<VerifiedToken, TokenError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        let claims = data.claims;
        if claims.sub.trim().is_empty() {
            return Err(TokenError::Malformed);
        }
        if now >= claims.exp.saturating_add(self.leeway_seconds) {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-testing-minimum-32-chars";
    const NOW: i64 = 1_760_000_000;

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 3600, 0)
    }

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let codec = codec();
        let token = codec.issue("alice", NOW).unwrap();

        let verified = codec.verify(&token, NOW + 10).unwrap();
        assert_eq!(verified.subject, "alice");
        assert_eq!(verified.issued_at, NOW);
        assert_eq!(verified.expires_at, NOW + 3600);
    }

    #[test]
    fn verify_is_deterministic() {
        let codec = codec();
        let token = codec.issue("alice", NOW).unwrap();

        assert_eq!(codec.verify(&token, NOW), codec.verify(&token, NOW));
    }

    #[test]
    fn token_is_expired_at_exactly_exp() {
        let codec = codec();
        let token = codec.issue("alice", NOW).unwrap();

        assert!(codec.verify(&token, NOW + 3599).is_ok());
        assert_eq!(codec.verify(&token, NOW + 3600), Err(TokenError::Expired));
        assert_eq!(codec.verify(&token, NOW + 7200), Err(TokenError::Expired));
    }

    #[test]
    fn leeway_extends_expiry() {
        let codec = TokenCodec::new(SECRET, 3600, 30);
        let token = codec.issue("alice", NOW).unwrap();

        assert!(codec.verify(&token, NOW + 3620).is_ok());
        assert_eq!(codec.verify(&token, NOW + 3630), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_key_has_bad_signature() {
        let forged = TokenCodec::new(b"wrong-secret-key-for-testing-minimum-32-chars", 3600, 0)
            .issue("alice", NOW)
            .unwrap();

        assert_eq!(codec().verify(&forged, NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn forged_and_expired_token_reports_bad_signature() {
        let forged = TokenCodec::new(b"wrong-secret-key-for-testing-minimum-32-chars", 60, 0)
            .issue("alice", NOW)
            .unwrap();

        assert_eq!(
            codec().verify(&forged, NOW + 3600),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.issue("alice", NOW).unwrap();
        let other = codec.issue("mallory", NOW).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(codec.verify(&spliced, NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec();
        assert_eq!(codec.verify("garbage", NOW), Err(TokenError::Malformed));
        assert_eq!(codec.verify("", NOW), Err(TokenError::Malformed));
        assert_eq!(
            codec.verify("invalid.token.here", NOW),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn empty_subject_is_malformed() {
        let codec = codec();
        let token = codec.issue("  ", NOW).unwrap();
        assert_eq!(codec.verify(&token, NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let rendered = format!("{:?}", codec());
        assert!(!rendered.contains("test-secret"));
    }
}
