//! Remote Entity
//!
//! A configured entity: a name-keyed table of operation specs sharing
//! one build-and-execute path. Dispatch is data-driven; there is no
//! generated code and no global registry.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::ClientCredentialsTokenFetcher;
use crate::core::{HttpTransport, ReqwestTransport};
use crate::error::{InvalidArgumentError, RemoteEntityError, TransportError};
use crate::request::RequestBuilder;
use crate::types::{AuthProviders, EntityConfig, MethodSpec};

/// A callable handle over one entity's configured operations.
///
/// Configuration is read-only after construction and shared by reference
/// across calls; concurrent invocations do not interfere.
pub struct RemoteEntity<T: HttpTransport = ReqwestTransport> {
    name: String,
    operations: HashMap<String, MethodSpec>,
    authentications: Option<AuthProviders>,
    transport: Arc<T>,
    builder: RequestBuilder<ClientCredentialsTokenFetcher<T>>,
}

impl RemoteEntity<ReqwestTransport> {
    /// Build an entity from configuration with the default transport.
    pub fn configure(config: EntityConfig) -> Result<Self, RemoteEntityError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> RemoteEntity<T> {
    /// Build an entity over an injected transport. The token fetcher
    /// shares the same transport.
    pub fn with_transport(
        config: EntityConfig,
        transport: Arc<T>,
    ) -> Result<Self, RemoteEntityError> {
        config.validate()?;

        let operations = config
            .methods
            .into_iter()
            .map(|method| (method.name.clone(), method))
            .collect();

        let fetcher = Arc::new(ClientCredentialsTokenFetcher::new(transport.clone()));

        Ok(Self {
            name: config.name,
            operations,
            authentications: config.authentications,
            transport,
            builder: RequestBuilder::new(fetcher),
        })
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured operation names, sorted.
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The declared spec of one configured operation.
    pub fn operation(&self, name: &str) -> Option<&MethodSpec> {
        self.operations.get(name)
    }

    /// Invoke a configured operation with an argument bag.
    ///
    /// Returns the parsed response body when the operation declares
    /// `returns_body` and the response is non-empty; `None` otherwise.
    pub async fn invoke(
        &self,
        operation: &str,
        args: Value,
    ) -> Result<Option<Value>, RemoteEntityError> {
        let spec = self.operations.get(operation).ok_or_else(|| {
            InvalidArgumentError::UnknownOperation {
                operation: operation.to_string(),
            }
        })?;

        let request = self
            .builder
            .build(spec, &args, self.authentications.as_ref())
            .await?;

        tracing::debug!(
            entity = %self.name,
            operation,
            method = request.method.as_str(),
            url = %request.url,
            "executing operation"
        );

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(RemoteEntityError::Transport)?;

        tracing::debug!(entity = %self.name, operation, status = response.status, "operation completed");

        if spec.returns_body && !response.body.is_empty() {
            let parsed = serde_json::from_slice(&response.body).map_err(|e| {
                TransportError::MalformedBody {
                    message: e.to_string(),
                }
            })?;
            return Ok(Some(parsed));
        }

        Ok(None)
    }
}
