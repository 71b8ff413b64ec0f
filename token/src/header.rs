//! Token header

use crate::error::{TokenError, TokenResult};
use serde::Serialize;
use serde_json::Value;

/// The only supported signing algorithm
pub const ALGORITHM: &str = "HS256";

/// The only supported token type
pub const TOKEN_TYPE: &str = "JWT";

/// Fixed token header. Serializes as `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Algorithm used for signing
    pub alg: &'static str,
    /// Token type
    pub typ: &'static str,
}

impl Header {
    /// The header every token carries
    pub const HS256: Header = Header {
        alg: ALGORITHM,
        typ: TOKEN_TYPE,
    };

    /// Check a decoded header object.
    ///
    /// `typ` is checked before `alg`. Extra members are tolerated; absent or
    /// non-string members fail like a wrong value.
    pub(crate) fn check(value: &Value) -> TokenResult<Header> {
        let object = value
            .as_object()
            .ok_or_else(|| TokenError::structure("header is not a JSON object"))?;

        match object.get("typ").and_then(Value::as_str) {
            Some(TOKEN_TYPE) => {}
            Some(other) => return Err(TokenError::Type(other.to_string())),
            None => return Err(TokenError::Type(describe(object.get("typ")))),
        }

        match object.get("alg").and_then(Value::as_str) {
            Some(ALGORITHM) => {}
            Some(other) => return Err(TokenError::Algorithm(other.to_string())),
            None => return Err(TokenError::Algorithm(describe(object.get("alg")))),
        }

        Ok(Header::HS256)
    }
}

impl Default for Header {
    fn default() -> Self {
        Header::HS256
    }
}

fn describe(member: Option<&Value>) -> String {
    match member {
        None => "<missing>".to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_serializes_exactly() {
        assert_eq!(
            serde_json::to_string(&Header::HS256).unwrap(),
            r#"{"alg":"HS256","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_check_accepts_extra_members() {
        let header = json!({"typ": "JWT", "alg": "HS256", "kid": "k1"});
        assert_eq!(Header::check(&header), Ok(Header::HS256));
    }

    #[test]
    fn test_check_type_before_algorithm() {
        let header = json!({"typ": "JWS", "alg": "none"});
        assert_eq!(Header::check(&header), Err(TokenError::Type("JWS".into())));
    }

    #[test]
    fn test_check_rejects_algorithms() {
        for alg in ["none", "HS512", "RS256", "hs256"] {
            let header = json!({"typ": "JWT", "alg": alg});
            assert_eq!(
                Header::check(&header),
                Err(TokenError::Algorithm(alg.to_string()))
            );
        }
    }

    #[test]
    fn test_check_missing_members() {
        assert!(matches!(
            Header::check(&json!({"alg": "HS256"})),
            Err(TokenError::Type(_))
        ));
        assert!(matches!(
            Header::check(&json!({"typ": "JWT", "alg": 256})),
            Err(TokenError::Algorithm(_))
        ));
        assert!(matches!(
            Header::check(&json!(["HS256"])),
            Err(TokenError::Structure(_))
        ));
    }
}
