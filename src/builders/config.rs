//! Configuration Builder
//!
//! Fluent construction of entity and operation configuration, for
//! callers that assemble entities in code rather than from JSON.

use std::collections::HashMap;

use crate::core::HttpMethod;
use crate::error::ConfigurationError;
use crate::types::{
    AuthProviders, AuthenticationSpec, EntityConfig, MethodSpec, OAuth2Provider, ParamMapping,
};

/// Entity configuration builder.
#[derive(Default)]
pub struct EntityConfigBuilder {
    name: Option<String>,
    methods: Vec<MethodSpec>,
    oauth2_providers: HashMap<String, OAuth2Provider>,
}

impl EntityConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entity name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare an operation.
    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    /// Register an OAuth2 provider under a grant type.
    pub fn oauth2_provider(
        mut self,
        grant_type: impl Into<String>,
        provider: OAuth2Provider,
    ) -> Self {
        self.oauth2_providers.insert(grant_type.into(), provider);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<EntityConfig, ConfigurationError> {
        let authentications = if self.oauth2_providers.is_empty() {
            None
        } else {
            Some(AuthProviders {
                oauth2: self.oauth2_providers,
            })
        };

        let config = EntityConfig {
            name: self.name.unwrap_or_default(),
            methods: self.methods,
            authentications,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Operation spec builder.
pub struct MethodSpecBuilder {
    name: Option<String>,
    url: Option<String>,
    http_method: HttpMethod,
    param_mapping: ParamMapping,
    authentication: Option<AuthenticationSpec>,
    returns_body: bool,
}

impl Default for MethodSpecBuilder {
    fn default() -> Self {
        Self {
            name: None,
            url: None,
            http_method: HttpMethod::Get,
            param_mapping: ParamMapping::default(),
            authentication: None,
            returns_body: false,
        }
    }
}

impl MethodSpecBuilder {
    /// Create a new spec builder; the verb defaults to GET.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the URL template.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the HTTP verb.
    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = method;
        self
    }

    /// Keys resolving path placeholders.
    pub fn path_params<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param_mapping.path_params = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Keys emitted as the query string, in order.
    pub fn query_params<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param_mapping.query_params = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Keys projected into the JSON body, in order.
    pub fn body_params<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param_mapping.body_params = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Set the authentication configuration.
    pub fn authentication(mut self, authentication: AuthenticationSpec) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Surface the parsed response body to the caller.
    pub fn returns_body(mut self, returns_body: bool) -> Self {
        self.returns_body = returns_body;
        self
    }

    /// Validate and build the spec.
    pub fn build(self) -> Result<MethodSpec, ConfigurationError> {
        let name = self.name.ok_or_else(|| ConfigurationError::MissingRequired {
            field: "method.name".to_string(),
        })?;
        let url = self.url.ok_or_else(|| ConfigurationError::MissingRequired {
            field: "method.url".to_string(),
        })?;

        let mapping = self.param_mapping;
        let param_mapping = if mapping.path_params.is_none()
            && mapping.query_params.is_none()
            && mapping.body_params.is_none()
        {
            None
        } else {
            Some(mapping)
        };

        Ok(MethodSpec {
            name,
            url,
            http_method: self.http_method,
            param_mapping,
            authentication: self.authentication,
            returns_body: self.returns_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn provider() -> OAuth2Provider {
        OAuth2Provider {
            client_id: "id".to_string(),
            client_secret: SecretString::new("secret".to_string()),
            site: "https://auth.example.com".to_string(),
            token_url: "oauth/token".to_string(),
            scope: None,
        }
    }

    #[test]
    fn test_build_complete_config() {
        let config = EntityConfigBuilder::new()
            .name("User")
            .method(
                MethodSpecBuilder::new()
                    .name("get_user")
                    .url("https://example.com/users/:id")
                    .path_params(["id"])
                    .returns_body(true)
                    .build()
                    .unwrap(),
            )
            .oauth2_provider("client_credentials", provider())
            .build()
            .unwrap();

        assert_eq!(config.name, "User");
        assert_eq!(config.methods.len(), 1);
        assert!(config
            .authentications
            .unwrap()
            .oauth2_provider("client_credentials")
            .is_some());
    }

    #[test]
    fn test_build_without_name_fails() {
        let result = EntityConfigBuilder::new()
            .method(
                MethodSpecBuilder::new()
                    .name("ping")
                    .url("https://example.com/ping")
                    .build()
                    .unwrap(),
            )
            .build();
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingRequired { ref field }) if field == "name"
        ));
    }

    #[test]
    fn test_build_without_methods_fails() {
        let result = EntityConfigBuilder::new().name("User").build();
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingRequired { ref field }) if field == "methods"
        ));
    }

    #[test]
    fn test_method_spec_defaults() {
        let spec = MethodSpecBuilder::new()
            .name("ping")
            .url("https://example.com/ping")
            .build()
            .unwrap();

        assert_eq!(spec.http_method, HttpMethod::Get);
        assert!(spec.param_mapping.is_none());
        assert!(spec.authentication.is_none());
        assert!(!spec.returns_body);
    }

    #[test]
    fn test_method_spec_requires_name_and_url() {
        assert!(MethodSpecBuilder::new().url("https://x").build().is_err());
        assert!(MethodSpecBuilder::new().name("x").build().is_err());
    }

    #[test]
    fn test_method_spec_with_full_mapping() {
        let spec = MethodSpecBuilder::new()
            .name("create_post")
            .url("https://example.com/users/:id/posts")
            .http_method(HttpMethod::Post)
            .path_params(["id"])
            .query_params(["notify"])
            .body_params(["title", "body"])
            .authentication(
                AuthenticationSpec::new("oauth2.client_credentials")
                    .with_instant_token_key("user_token"),
            )
            .returns_body(true)
            .build()
            .unwrap();

        assert_eq!(spec.path_params(), Some(&["id".to_string()][..]));
        assert_eq!(spec.query_params(), Some(&["notify".to_string()][..]));
        assert_eq!(spec.body_params().unwrap().len(), 2);
        assert!(spec.authentication.is_some());
    }
}
