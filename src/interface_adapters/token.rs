use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::domain::entities::Identity;
use crate::domain::errors::TokenDecodeError;
use crate::domain::ports::TokenDecoder;

// Claims as they appear in the backend's JWT payload.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    roles: Option<RolesClaim>,
    #[serde(default)]
    exp: Option<u64>,
    #[serde(default)]
    iat: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesClaim {
    One(String),
    Many(Vec<String>),
}

/// Reads the claims of a JWT without verifying its signature.
///
/// The backend verifies the signature on every request; the front-end only
/// needs the subject, roles and expiry to drive its views.
#[derive(Clone, Copy, Debug, Default)]
pub struct JwtPayloadDecoder;

impl TokenDecoder for JwtPayloadDecoder {
    fn decode(&self, token: &str) -> Result<Identity, TokenDecodeError> {
        let mut segments = token.trim().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenDecodeError::Malformed);
        };
        if payload.is_empty() {
            return Err(TokenDecodeError::Malformed);
        }

        // Some issuers pad the segment even though the JWT format forbids it.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| TokenDecodeError::InvalidEncoding)?;
        let raw: RawClaims = serde_json::from_slice(&bytes)
            .map_err(|err| TokenDecodeError::InvalidPayload(err.to_string()))?;

        let subject = raw
            .sub
            .filter(|sub| !sub.trim().is_empty())
            .ok_or(TokenDecodeError::MissingClaim("sub"))?;
        let roles: Vec<String> = match raw.roles {
            Some(RolesClaim::One(role)) => vec![role],
            Some(RolesClaim::Many(roles)) => roles,
            None => Vec::new(),
        }
        .into_iter()
        .filter(|role| !role.trim().is_empty())
        .collect();
        if roles.is_empty() {
            return Err(TokenDecodeError::MissingClaim("roles"));
        }
        let expires_at = raw.exp.ok_or(TokenDecodeError::MissingClaim("exp"))?;

        Ok(Identity {
            subject,
            roles,
            expires_at,
            issued_at: raw.iat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{encode_token, token_for};
    use serde_json::json;

    #[test]
    fn when_token_is_issued_by_backend_then_claims_are_decoded() {
        let token = token_for("ada@hotel.test", &["ROLE_USER"], 1_700_003_600);

        let identity = JwtPayloadDecoder
            .decode(&token)
            .expect("expected token to decode");

        assert_eq!(
            identity,
            Identity {
                subject: "ada@hotel.test".to_string(),
                roles: vec!["ROLE_USER".to_string()],
                expires_at: 1_700_003_600,
                issued_at: Some(1_700_000_000),
            }
        );
    }

    #[test]
    fn when_roles_claim_is_a_single_string_then_it_becomes_one_role() {
        let token = encode_token(&json!({
            "sub": "ada@hotel.test",
            "roles": "ROLE_ADMIN",
            "exp": 1_700_003_600u64,
        }));

        let identity = JwtPayloadDecoder
            .decode(&token)
            .expect("expected token to decode");

        assert_eq!(identity.roles, vec!["ROLE_ADMIN".to_string()]);
        assert_eq!(identity.issued_at, None);
    }

    #[test]
    fn when_token_has_two_segments_then_returns_malformed() {
        assert_eq!(
            JwtPayloadDecoder.decode("header.payload"),
            Err(TokenDecodeError::Malformed)
        );
    }

    #[test]
    fn when_token_has_four_segments_then_returns_malformed() {
        assert_eq!(
            JwtPayloadDecoder.decode("a.b.c.d"),
            Err(TokenDecodeError::Malformed)
        );
    }

    #[test]
    fn when_token_is_empty_then_returns_malformed() {
        assert_eq!(JwtPayloadDecoder.decode(""), Err(TokenDecodeError::Malformed));
    }

    #[test]
    fn when_payload_is_not_base64url_then_returns_invalid_encoding() {
        assert_eq!(
            JwtPayloadDecoder.decode("header.!!!.signature"),
            Err(TokenDecodeError::InvalidEncoding)
        );
    }

    #[test]
    fn when_payload_is_not_json_then_returns_invalid_payload() {
        let payload = URL_SAFE_NO_PAD.encode("not json");
        let token = format!("header.{payload}.signature");

        assert!(matches!(
            JwtPayloadDecoder.decode(&token),
            Err(TokenDecodeError::InvalidPayload(_))
        ));
    }

    #[test]
    fn when_payload_is_padded_then_it_still_decodes() {
        let token = token_for("ada@hotel.test", &["ROLE_USER"], 1_700_003_600);
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");

        assert!(JwtPayloadDecoder.decode(&parts.join(".")).is_ok());
    }

    #[test]
    fn when_subject_is_missing_then_returns_missing_sub() {
        let token = encode_token(&json!({ "roles": ["ROLE_USER"], "exp": 1u64 }));

        assert_eq!(
            JwtPayloadDecoder.decode(&token),
            Err(TokenDecodeError::MissingClaim("sub"))
        );
    }

    #[test]
    fn when_roles_are_empty_then_returns_missing_roles() {
        let token = encode_token(&json!({ "sub": "ada@hotel.test", "roles": [], "exp": 1u64 }));

        assert_eq!(
            JwtPayloadDecoder.decode(&token),
            Err(TokenDecodeError::MissingClaim("roles"))
        );
    }

    #[test]
    fn when_expiry_is_missing_then_returns_missing_exp() {
        let token = encode_token(&json!({ "sub": "ada@hotel.test", "roles": ["ROLE_USER"] }));

        assert_eq!(
            JwtPayloadDecoder.decode(&token),
            Err(TokenDecodeError::MissingClaim("exp"))
        );
    }

    #[test]
    fn when_expiry_is_not_a_number_then_returns_invalid_payload() {
        let token = encode_token(&json!({
            "sub": "ada@hotel.test",
            "roles": ["ROLE_USER"],
            "exp": "tomorrow",
        }));

        assert!(matches!(
            JwtPayloadDecoder.decode(&token),
            Err(TokenDecodeError::InvalidPayload(_))
        ));
    }
}
