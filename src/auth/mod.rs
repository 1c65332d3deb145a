//! Authorization Resolution
//!
//! Decides how a configured operation obtains its `Authorization`
//! header: a caller-supplied instant token always wins; otherwise an
//! OAuth2 grant descriptor delegates to the token fetcher; anything else
//! leaves the request unauthenticated.

pub mod token;

pub use token::{ClientCredentialsTokenFetcher, MockTokenFetcher, TokenFetcher};

use serde_json::Value;
use std::sync::Arc;

use crate::error::RemoteEntityError;
use crate::params::{value_to_plain_string, ArgumentBag};
use crate::types::{AuthProviders, AuthenticationSpec};

/// Resolves the `Authorization` header value for one invocation.
pub struct AuthResolver<F: TokenFetcher> {
    fetcher: Arc<F>,
}

impl<F: TokenFetcher> AuthResolver<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Produce the header value, or `None` when the configured method is
    /// not a recognized grant. Never mutates the argument bag.
    pub async fn resolve(
        &self,
        authentication: &AuthenticationSpec,
        args: &ArgumentBag,
        providers: Option<&AuthProviders>,
    ) -> Result<Option<String>, RemoteEntityError> {
        if let Some(key) = &authentication.accepting_instant_token {
            if let Some(value) = args.get(key) {
                if is_truthy(value) {
                    tracing::debug!(key = %key, "using caller-supplied token");
                    return Ok(Some(format!("Bearer {}", value_to_plain_string(value))));
                }
            }
        }

        if authentication.method.contains("oauth2") {
            let token = self
                .fetcher
                .fetch(&authentication.method, providers)
                .await?;
            return Ok(Some(format!("Bearer {token}")));
        }

        // Unrecognized method: the request goes out unauthenticated.
        Ok(None)
    }
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
