use base64::Engine as _;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::ports::token_codec::TokenCodec;

/// Storage key for a token. Raw tokens never reach the database.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(out)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub access: String,
    pub jti: String,
    pub iat: usize,
}

/// HS256 tokens without expiry; revocation happens by removing the stored token.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtTokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: Uuid, access: &str) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            access: access.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: chrono::Utc::now().timestamp().max(0) as usize,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    fn verify(&self, token: &str, access: &str) -> anyhow::Result<Uuid> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::validation())?;
        anyhow::ensure!(data.claims.access == access, "unexpected token access");
        Ok(Uuid::parse_str(&data.claims.sub)?)
    }
}
