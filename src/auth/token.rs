//! Token Acquisition
//!
//! OAuth2 client-credentials exchange against a configured provider.
//! Every authorized call performs a fresh exchange; tokens are not
//! cached.

use async_trait::async_trait;
use base64::Engine;
use secrecy::ExposeSecret;
use std::sync::Arc;
use url::Url;

use crate::core::{HttpMethod, HttpTransport, RequestDescriptor};
use crate::error::{AuthProviderError, ConfigurationError, RemoteEntityError};
use crate::types::{AuthProviders, OAuth2Provider, TokenResponse};

const OAUTH2_FAMILY: &str = "oauth2";
const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Token acquisition interface (for dependency injection).
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Exchange the described grant for a bearer token string.
    async fn fetch(
        &self,
        grant_descriptor: &str,
        providers: Option<&AuthProviders>,
    ) -> Result<String, RemoteEntityError>;
}

/// Client-credentials token fetcher.
///
/// Parses a `"oauth2.<grant>"` descriptor, looks up the provider for the
/// grant type, and POSTs a form-encoded exchange with HTTP Basic client
/// authentication.
pub struct ClientCredentialsTokenFetcher<T: HttpTransport> {
    transport: Arc<T>,
}

impl<T: HttpTransport> ClientCredentialsTokenFetcher<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Extract the grant type from a descriptor. Anything other than
    /// `oauth2.client_credentials` is a configuration error.
    fn grant_type(descriptor: &str) -> Result<&'static str, ConfigurationError> {
        let mut parts = descriptor.splitn(2, '.');
        let family = parts.next().unwrap_or_default();
        match (family, parts.next()) {
            (OAUTH2_FAMILY, Some(CLIENT_CREDENTIALS_GRANT)) => Ok(CLIENT_CREDENTIALS_GRANT),
            _ => Err(ConfigurationError::UnsupportedGrant {
                descriptor: descriptor.to_string(),
            }),
        }
    }

    /// Resolve the token endpoint: an absolute `token_url` wins, a
    /// relative one is joined onto `site`.
    fn token_endpoint(provider: &OAuth2Provider) -> Result<String, ConfigurationError> {
        if let Ok(absolute) = Url::parse(&provider.token_url) {
            return Ok(absolute.to_string());
        }

        let site = Url::parse(&provider.site).map_err(|_| {
            ConfigurationError::InvalidTokenEndpoint {
                url: provider.site.clone(),
            }
        })?;
        let endpoint = site.join(&provider.token_url).map_err(|_| {
            ConfigurationError::InvalidTokenEndpoint {
                url: provider.token_url.clone(),
            }
        })?;
        Ok(endpoint.to_string())
    }

    fn exchange_body(provider: &OAuth2Provider) -> String {
        let mut pairs = vec![("grant_type", CLIENT_CREDENTIALS_GRANT.to_string())];
        if let Some(scope) = &provider.scope {
            if !scope.is_empty() {
                pairs.push(("scope", scope.clone()));
            }
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn basic_auth(provider: &OAuth2Provider) -> String {
        let credentials = format!(
            "{}:{}",
            provider.client_id,
            provider.client_secret.expose_secret()
        );
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }
}

#[async_trait]
impl<T: HttpTransport> TokenFetcher for ClientCredentialsTokenFetcher<T> {
    async fn fetch(
        &self,
        grant_descriptor: &str,
        providers: Option<&AuthProviders>,
    ) -> Result<String, RemoteEntityError> {
        let grant_type = Self::grant_type(grant_descriptor)?;
        let provider = providers
            .and_then(|p| p.oauth2_provider(grant_type))
            .ok_or_else(|| ConfigurationError::MissingProvider {
                grant_type: grant_type.to_string(),
            })?;

        let url = Self::token_endpoint(provider)?;
        tracing::debug!(grant_type, endpoint = %url, "requesting token");

        let request = RequestDescriptor {
            method: HttpMethod::Post,
            url,
            headers: vec![
                (
                    "content-type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ),
                ("accept".to_string(), "application/json".to_string()),
                ("authorization".to_string(), Self::basic_auth(provider)),
            ],
            body: Some(Self::exchange_body(provider).into_bytes()),
        };

        let response = self.transport.execute(request).await.map_err(|e| {
            AuthProviderError::ExchangeTransport {
                message: e.to_string(),
            }
        })?;

        if !(200..300).contains(&response.status) {
            return Err(AuthProviderError::ExchangeFailed {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
            .into());
        }

        let token: TokenResponse = serde_json::from_slice(&response.body).map_err(|e| {
            AuthProviderError::MalformedTokenResponse {
                message: e.to_string(),
            }
        })?;

        Ok(token.access_token)
    }
}

/// Mock token fetcher for tests: queued tokens, recorded descriptors.
#[derive(Default)]
pub struct MockTokenFetcher {
    calls: std::sync::Mutex<Vec<String>>,
    next_token: std::sync::Mutex<Option<String>>,
    next_error: std::sync::Mutex<Option<RemoteEntityError>>,
}

impl MockTokenFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token returned by the next fetch.
    pub fn set_next_token(&self, token: impl Into<String>) -> &Self {
        *self.next_token.lock().unwrap() = Some(token.into());
        self
    }

    /// Error returned by the next fetch.
    pub fn set_next_error(&self, error: RemoteEntityError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Grant descriptors fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenFetcher for MockTokenFetcher {
    async fn fetch(
        &self,
        grant_descriptor: &str,
        _providers: Option<&AuthProviders>,
    ) -> Result<String, RemoteEntityError> {
        self.calls.lock().unwrap().push(grant_descriptor.to_string());

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        Ok(self
            .next_token
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| "mock-token".to_string()))
    }
}
