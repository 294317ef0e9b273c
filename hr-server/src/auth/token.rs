//! Identity token service
//!
//! HS256 JWTs carrying `{sub, email, role, name, iat, exp}`. Tokens are
//! stateless: there is no server-side session table, so a token stays
//! valid until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use shared::client::TokenClaims;
use shared::error::AppError;
use shared::models::{Account, Role};
use thiserror::Error;

pub const TOKEN_EXPIRY_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("missing token")]
    MissingToken,

    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,
}

impl From<VerificationError> for AppError {
    fn from(e: VerificationError) -> Self {
        match e {
            VerificationError::MissingToken => AppError::not_authenticated(),
            VerificationError::Expired => AppError::token_expired(),
            VerificationError::Malformed => AppError::invalid_token("Invalid token"),
        }
    }
}

/// Caller identity decoded from a verified token. Trusted for the
/// current request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            email: account.email.clone(),
            role: account.role,
            name: account.full_name.clone(),
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
            name: claims.name,
        }
    }
}

/// `"<scheme> <token>"` → `<token>`. Splits on whitespace like the
/// clients send it; a header without a second segment has no token.
pub fn extract_bearer(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `identity`, valid for [`TOKEN_EXPIRY_HOURS`].
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = TokenClaims {
            sub: identity.account_id.clone(),
            email: identity.email.clone(),
            role: identity.role,
            name: identity.name.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, VerificationError> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.into()),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(VerificationError::Expired),
                _ => {
                    tracing::debug!("JWT validation failed: {e}");
                    Err(VerificationError::Malformed)
                }
            },
        }
    }

    /// Verify the raw `Authorization` header value
    pub fn verify_header(&self, header: Option<&str>) -> Result<Identity, VerificationError> {
        let token = header
            .and_then(extract_bearer)
            .ok_or(VerificationError::MissingToken)?;
        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            account_id: "acc-1".into(),
            email: "a@x.com".into(),
            role: Role::Hr,
            name: "Asha".into(),
        }
    }

    #[test]
    fn test_round_trip() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&identity()).unwrap();
        assert_eq!(service.verify(&token).unwrap(), identity());
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new("test-secret");
        let issued = Utc::now() - Duration::hours(TOKEN_EXPIRY_HOURS) - Duration::seconds(5);
        let token = service.issue_at(&identity(), issued).unwrap();
        assert_eq!(service.verify(&token), Err(VerificationError::Expired));
    }

    #[test]
    fn test_tampered_signature() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&identity()).unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let forged = format!("{unsigned}.{}", signature.chars().rev().collect::<String>());
        assert_eq!(service.verify(&forged), Err(VerificationError::Malformed));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = TokenService::new("one").issue(&identity()).unwrap();
        assert_eq!(
            TokenService::new("two").verify(&token),
            Err(VerificationError::Malformed)
        );
    }

    #[test]
    fn test_header_parsing() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&identity()).unwrap();

        assert!(service.verify_header(Some(&format!("Bearer {token}"))).is_ok());
        assert!(service.verify_header(Some(&format!("Bearer   {token}"))).is_ok());
        assert_eq!(
            service.verify_header(None),
            Err(VerificationError::MissingToken)
        );
        assert_eq!(
            service.verify_header(Some("Bearer")),
            Err(VerificationError::MissingToken)
        );
        assert_eq!(
            service.verify_header(Some("Bearer garbage")),
            Err(VerificationError::Malformed)
        );
    }
}
