//! Token Types
//!
//! Wire format of the token endpoint response.

use serde::Deserialize;
use std::collections::HashMap;

/// Token response from the authorization server.
///
/// Only `access_token` is consumed; the rest is carried for completeness.
/// Tokens are not cached, so expiry is never tracked.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Token type (usually "Bearer").
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expires in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 7200,
            "scope": "public"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "test-token");
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, Some(7200));
        assert_eq!(response.scope, Some("public".to_string()));
        assert!(response.extra.is_empty());
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token": "t"}"#).unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, None);
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let json = r#"{"access_token": "t", "created_at": 1700000000}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(response.extra.contains_key("created_at"));
    }
}
