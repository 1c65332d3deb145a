//! Configuration Types
//!
//! Entity-level configuration: name, operations, and the auth providers
//! shared by every operation of the entity.

use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConfigurationError;
use crate::types::MethodSpec;

/// Configuration of one entity: a named collection of remote operations
/// sharing one authentication configuration.
///
/// Read-only after construction; shared by reference across calls.
#[derive(Clone, Debug, Deserialize)]
pub struct EntityConfig {
    /// Entity name.
    pub name: String,
    /// Declared operations.
    pub methods: Vec<MethodSpec>,
    /// Auth providers, keyed by grant type.
    #[serde(default)]
    pub authentications: Option<AuthProviders>,
}

impl EntityConfig {
    /// Fail fast when required setup fields are absent.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::MissingRequired {
                field: "name".to_string(),
            });
        }
        if self.methods.is_empty() {
            return Err(ConfigurationError::MissingRequired {
                field: "methods".to_string(),
            });
        }
        Ok(())
    }
}

/// Auth provider configuration, grouped by grant family.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthProviders {
    /// OAuth2 providers, keyed by grant type (e.g. `client_credentials`).
    #[serde(default)]
    pub oauth2: HashMap<String, OAuth2Provider>,
}

impl AuthProviders {
    /// Look up the provider for a grant type.
    pub fn oauth2_provider(&self, grant_type: &str) -> Option<&OAuth2Provider> {
        self.oauth2.get(grant_type)
    }
}

/// One OAuth2 provider: the credentials and endpoints used to acquire a
/// token for a given grant type.
#[derive(Clone, Deserialize)]
pub struct OAuth2Provider {
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: SecretString,
    /// Provider base URL.
    pub site: String,
    /// Token endpoint, absolute or relative to `site`.
    pub token_url: String,
    /// Scope requested at the token endpoint.
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for OAuth2Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Provider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("site", &self.site)
            .field("token_url", &self.token_url)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HttpMethod;

    fn minimal_method() -> MethodSpec {
        MethodSpec {
            name: "ping".to_string(),
            url: "https://example.com/ping".to_string(),
            http_method: HttpMethod::Get,
            param_mapping: None,
            authentication: None,
            returns_body: false,
        }
    }

    #[test]
    fn test_validate_requires_name() {
        let config = EntityConfig {
            name: String::new(),
            methods: vec![minimal_method()],
            authentications: None,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingRequired { ref field } if field == "name"
        ));
    }

    #[test]
    fn test_validate_requires_methods() {
        let config = EntityConfig {
            name: "User".to_string(),
            methods: Vec::new(),
            authentications: None,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingRequired { ref field } if field == "methods"
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "name": "User",
            "methods": [{
                "name": "get_user",
                "url": "https://example.com/users/:id",
                "http_method": "GET",
                "param_mapping": { "path_params": ["id"] },
                "returns_body": true
            }],
            "authentications": {
                "oauth2": {
                    "client_credentials": {
                        "client_id": "the-id",
                        "client_secret": "the-secret",
                        "site": "https://auth.example.com",
                        "token_url": "oauth/token",
                        "scope": "public"
                    }
                }
            }
        }"#;

        let config: EntityConfig = serde_json::from_str(json).unwrap();
        config.validate().unwrap();
        assert_eq!(config.name, "User");
        assert_eq!(config.methods.len(), 1);

        let providers = config.authentications.unwrap();
        let provider = providers.oauth2_provider("client_credentials").unwrap();
        assert_eq!(provider.client_id, "the-id");
        assert_eq!(provider.scope.as_deref(), Some("public"));
        assert!(providers.oauth2_provider("password").is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let provider = OAuth2Provider {
            client_id: "the-id".to_string(),
            client_secret: SecretString::new("hunter2".to_string()),
            site: "https://auth.example.com".to_string(),
            token_url: "oauth/token".to_string(),
            scope: None,
        };
        let rendered = format!("{provider:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }
}
