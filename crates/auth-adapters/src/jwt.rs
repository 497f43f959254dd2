//! HS256 implementation of the `TokenCodec` port.
//!
//! Tokens carry a single `user_id` claim and — matching the system's
//! observed contract — no expiration. They stay valid until the signing
//! secret rotates.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{AppError, Result, TokenCodec};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: Uuid,
}

pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: Uuid) -> Result<String> {
        encode(&Header::default(), &Claims { user_id }, &self.encoding_key)
            .map_err(AppError::internal)
    }

    fn verify(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No `exp` claim is issued, so none is required or validated.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.user_id)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_to_user_id() {
        let codec = JwtTokenCodec::new(b"test-secret");
        let user_id = Uuid::now_v7();
        let token = codec.issue(user_id).unwrap();
        assert_eq!(codec.verify(&token), Some(user_id));
    }

    #[test]
    fn tampered_token_fails_open_to_none() {
        let codec = JwtTokenCodec::new(b"test-secret");
        let mut token = codec.issue(Uuid::now_v7()).unwrap();
        token.push('x');
        assert_eq!(codec.verify(&token), None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtTokenCodec::new(b"secret-one").issue(Uuid::now_v7()).unwrap();
        assert_eq!(JwtTokenCodec::new(b"secret-two").verify(&token), None);
    }

    #[test]
    fn garbage_is_rejected_without_panicking() {
        let codec = JwtTokenCodec::new(b"test-secret");
        for junk in ["", "not.a.jwt", "a.b", "Bearer abc"] {
            assert_eq!(codec.verify(junk), None);
        }
    }
}
