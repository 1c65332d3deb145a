//! Request Assembly
//!
//! Turns a method spec plus an argument bag into a complete request
//! descriptor, ready for the transport.

use serde_json::Value;
use std::sync::Arc;

use crate::auth::{AuthResolver, TokenFetcher};
use crate::core::RequestDescriptor;
use crate::error::{InvalidArgumentError, RemoteEntityError};
use crate::params::{self, ArgumentBag};
use crate::types::{AuthProviders, MethodSpec};

/// Assembles request descriptors from method specs and argument bags.
pub struct RequestBuilder<F: TokenFetcher> {
    resolver: AuthResolver<F>,
}

impl<F: TokenFetcher> RequestBuilder<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            resolver: AuthResolver::new(fetcher),
        }
    }

    /// Build the outbound request. An auth failure aborts the build, so
    /// the request is never sent.
    pub async fn build(
        &self,
        spec: &MethodSpec,
        args: &Value,
        providers: Option<&AuthProviders>,
    ) -> Result<RequestDescriptor, RemoteEntityError> {
        let bag = args
            .as_object()
            .ok_or_else(|| InvalidArgumentError::NotAnObject {
                actual: json_type_name(args).to_string(),
            })?;

        let url = resolve_url(spec, bag);

        let mut headers = vec![(
            "content-type".to_string(),
            "application/json".to_string(),
        )];

        if let Some(authentication) = &spec.authentication {
            if let Some(value) = self.resolver.resolve(authentication, bag, providers).await? {
                headers.push(("authorization".to_string(), value));
            }
        }

        // A declared body mapping always produces a JSON body, even when
        // the key list is empty.
        let body = spec.body_params().map(|keys| {
            Value::Object(params::build_body(keys, bag))
                .to_string()
                .into_bytes()
        });

        tracing::trace!(operation = %spec.name, url = %url, "request assembled");

        Ok(RequestDescriptor {
            method: spec.http_method,
            url,
            headers,
            body,
        })
    }
}

fn resolve_url(spec: &MethodSpec, args: &ArgumentBag) -> String {
    let mut url = spec.url.clone();
    if let Some(keys) = spec.path_params() {
        url = params::build_path(&url, keys, args);
    }
    if let Some(keys) = spec.query_params() {
        url = params::build_query(&url, keys, args);
    }
    url
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
