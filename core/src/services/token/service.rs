//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, VerifiedToken};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Stateless JWT codec for access and refresh tokens
///
/// Holds no store handles. Whether a verified refresh token is still usable
/// is decided by the rotation engine, not here.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: SigningKeys,
    refresh_keys: SigningKeys,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            access_keys: SigningKeys::from_secret(&config.access_secret),
            refresh_keys: SigningKeys::from_secret(&config.refresh_secret),
            config,
            validation,
        }
    }

    /// Mints an access token for `user_id`
    pub fn issue_access(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue(user_id, TokenKind::Access, self.config.access_lifetime)
    }

    /// Mints a refresh token for `user_id`
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue(user_id, TokenKind::Refresh, self.config.refresh_lifetime)
    }

    pub(crate) fn issue(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, kind, lifetime, &self.config.issuer);
        encode(&Header::new(Algorithm::HS256), &claims, &self.keys(kind).encoding)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Verifies signature, issuer, expiry and kind of `token`
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - Identity carried by the token
    /// * `Err(TokenError::Expired)` - Genuine but past its `exp`
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key
    /// * `Err(TokenError::WrongKind)` - Valid token of the other kind
    /// * `Err(TokenError::Malformed)` - Anything else
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<VerifiedToken, TokenError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = data.claims;
        if claims.typ != kind {
            return Err(TokenError::WrongKind);
        }

        Ok(VerifiedToken {
            user_id: claims.user_id().map_err(|_| TokenError::Malformed)?,
            expires_at: claims.expires_at().ok_or(TokenError::Malformed)?,
            kind,
        })
    }

    /// Reads the claims of `token` without checking its signature or expiry
    ///
    /// Only for tokens this service has just minted.
    pub fn decode_unsafe(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    pub fn access_lifetime(&self) -> Duration {
        self.config.access_lifetime
    }

    pub fn refresh_lifetime(&self) -> Duration {
        self.config.refresh_lifetime
    }

    pub fn refresh_reuse_grace(&self) -> Duration {
        self.config.refresh_reuse_grace
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new(TokenServiceConfig::default())
    }
}
