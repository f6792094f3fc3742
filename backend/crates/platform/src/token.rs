//! Signed Bearer Tokens
//!
//! Stateless auth tokens carried in the `Authorization: Bearer` header.
//! A token is `base64url(claims-json) . base64url(hmac-sha256)`, signed
//! with an application-wide secret. Claims carry the user id, an admin
//! flag, an expiry timestamp, and a `jti` for log correlation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

/// Token verification/issuance errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token is not in the expected two-segment format
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token has expired
    #[error("Token expired")]
    Expired,

    /// Claims could not be encoded
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Claims carried inside a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id
    pub sub: i64,
    /// Whether the user holds the admin role
    pub admin: bool,
    /// Expiry as unix milliseconds
    pub expires_at_ms: i64,
    /// Token id, for log correlation
    pub jti: Uuid,
}

impl TokenClaims {
    /// Check if the claims have expired
    pub fn is_expired(&self) -> bool {
        now_ms() > self.expires_at_ms
    }
}

/// Issues and verifies signed bearer tokens
#[derive(Clone)]
pub struct TokenService {
    secret: [u8; 32],
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: [u8; 32], ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: i64, is_admin: bool) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: user_id,
            admin: is_admin,
            expires_at_ms: now_ms() + self.ttl.as_millis() as i64,
            jti: Uuid::new_v4(),
        };
        self.sign(&claims)
    }

    /// Verify a token and return its claims
    ///
    /// The signature is checked before the payload is parsed, and the
    /// comparison is constant-time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (payload_b64, sig_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let sig = from_base64url(sig_b64).map_err(|_| TokenError::Malformed)?;
        let expected = hmac_sha256(&self.secret, payload_b64.as_bytes());
        if !constant_time_eq(&sig, &expected) {
            return Err(TokenError::InvalidSignature);
        }

        let payload = from_base64url(payload_b64).map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let payload_b64 = to_base64url(&payload);
        let sig = hmac_sha256(&self.secret, payload_b64.as_bytes());
        Ok(format!("{}.{}", payload_b64, to_base64url(&sig)))
    }
}

/// Extract the bearer token from an `Authorization` header, if present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new([7u8; 32], Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(42, false).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(!claims.admin);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_admin_flag_survives() {
        let tokens = service();
        let token = tokens.issue(1, true).unwrap();
        assert!(tokens.verify(&token).unwrap().admin);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service();
        let token = tokens.issue(42, false).unwrap();

        // Flip a payload character; signature no longer matches
        let (payload, sig) = token.split_once('.').unwrap();
        let mut bytes = payload.as_bytes().to_vec();
        bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
        let forged = format!("{}.{}", String::from_utf8(bytes).unwrap(), sig);

        assert!(matches!(
            tokens.verify(&forged),
            Err(TokenError::InvalidSignature) | Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(42, false).unwrap();
        let other = TokenService::new([8u8; 32], Duration::from_secs(3600));
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_rejected() {
        let tokens = service();
        let stale = TokenClaims {
            sub: 42,
            admin: false,
            expires_at_ms: now_ms() - 1_000,
            jti: Uuid::new_v4(),
        };
        let token = tokens.sign(&stale).unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        assert!(matches!(
            service().verify("nodotseparator"),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(
            http::header::AUTHORIZATION,
            "Bearer abc.def".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(http::header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(bearer_token(&headers).is_none());
    }
}
