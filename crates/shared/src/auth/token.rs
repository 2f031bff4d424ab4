use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Issues and checks the signed session credential binding a client to an
/// email address. Tokens are HS256 JWTs valid for one hour.
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(1))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: email.to_owned(),
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Recovers the email a token was issued for. Every failure mode
    /// (malformed, bad signature, expired) collapses to `None`; callers
    /// treat all of them as "unauthenticated".
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_returns_the_issued_email() {
        let tokens = SessionTokens::new("unit-secret");
        let token = tokens.issue("ana@example.com").unwrap();
        assert_eq!(tokens.verify(&token).as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn garbage_and_tampered_tokens_are_invalid() {
        let tokens = SessionTokens::new("unit-secret");
        assert_eq!(tokens.verify(""), None);
        assert_eq!(tokens.verify("not-a-token"), None);

        let token = tokens.issue("ana@example.com").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        assert_eq!(tokens.verify(&tampered), None);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_invalid() {
        let ours = SessionTokens::new("unit-secret");
        let theirs = SessionTokens::new("other-secret");
        let token = theirs.issue("ana@example.com").unwrap();
        assert_eq!(ours.verify(&token), None);
    }

    #[test]
    fn expired_tokens_are_invalid() {
        // Past the validator's default leeway.
        let tokens = SessionTokens::with_ttl("unit-secret", Duration::minutes(-5));
        let token = tokens.issue("ana@example.com").unwrap();
        assert_eq!(tokens.verify(&token), None);
    }
}
