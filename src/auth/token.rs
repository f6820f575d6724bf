use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use thiserror::Error;
use tracing::debug;

use super::types::{MemberClaims, MemberIdentity};

/// Errors raised while reading a member token.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("malformed member token: {0}")]
    Malformed(String),

    #[error("member token is expired")]
    Expired,
}

/// Decodes the claims of a member token without verifying its signature.
///
/// The relay never validates tokens; the chat service does. Claims are
/// decoded client-side purely to label the local member and to tell an
/// obviously dead token apart from a live one.
pub fn decode_member_claims(token: &str) -> Result<MemberClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();

    decode::<MemberClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| {
            debug!(
                member = data.claims.display_name(),
                exp = data.claims.exp,
                "Member token decoded"
            );
            data.claims
        })
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => {
                debug!(error = %e, "Failed to decode member token");
                AuthError::Malformed(e.to_string())
            }
        })
}

/// Classifies a connection token: empty means guest, anything else must be
/// a decodable member token.
pub fn classify_token(token: &str) -> Result<MemberIdentity, AuthError> {
    if token.is_empty() {
        return Ok(MemberIdentity::Guest);
    }
    decode_member_claims(token).map(MemberIdentity::Member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(name: Option<&str>, exp: usize) -> String {
        let claims = MemberClaims {
            name: name.map(str::to_string),
            exp,
            iat: Some(1_700_000_000),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_member_token() {
        let token = make_token(Some("alice"), 4_000_000_000);
        let claims = decode_member_claims(&token).unwrap();
        assert_eq!(claims.display_name(), "alice");
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        // Well past the default validation leeway.
        let token = make_token(Some("alice"), 1_000_000);
        assert_eq!(decode_member_claims(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_member_claims("not.a.token");
        assert!(matches!(result, Err(AuthError::Malformed(_))));
    }

    #[test]
    fn test_classify_empty_token_as_guest() {
        assert_eq!(classify_token("").unwrap(), MemberIdentity::Guest);
    }

    #[test]
    fn test_classify_member_token() {
        let token = make_token(Some("bob"), 4_000_000_000);
        match classify_token(&token).unwrap() {
            MemberIdentity::Member(claims) => assert_eq!(claims.display_name(), "bob"),
            MemberIdentity::Guest => panic!("expected member identity"),
        }
    }
}
