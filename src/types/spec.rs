//! Operation Specification Types
//!
//! Static, immutable description of one remote operation: verb, URL
//! template, parameter mapping, and optional authentication.

use serde::Deserialize;

use crate::core::HttpMethod;

/// Declarative description of one remote operation.
///
/// The `url` may contain path placeholders of the form `:key`; each
/// placeholder is resolved from the argument bag through the keys listed
/// in `param_mapping.path_params`.
#[derive(Clone, Debug, Deserialize)]
pub struct MethodSpec {
    /// Operation identifier, used for dispatch.
    pub name: String,
    /// URL template with zero or more `:key` placeholders.
    pub url: String,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Path/query/body parameter mapping.
    #[serde(default)]
    pub param_mapping: Option<ParamMapping>,
    /// Authentication configuration.
    #[serde(default)]
    pub authentication: Option<AuthenticationSpec>,
    /// Whether the parsed response body is surfaced to the caller.
    #[serde(default)]
    pub returns_body: bool,
}

impl MethodSpec {
    /// Keys resolving path placeholders, if declared.
    pub fn path_params(&self) -> Option<&[String]> {
        self.param_mapping.as_ref()?.path_params.as_deref()
    }

    /// Keys emitted as the query string, in declared order.
    pub fn query_params(&self) -> Option<&[String]> {
        self.param_mapping.as_ref()?.query_params.as_deref()
    }

    /// Keys projected into the JSON body, in declared order.
    pub fn body_params(&self) -> Option<&[String]> {
        self.param_mapping.as_ref()?.body_params.as_deref()
    }
}

/// Mapping from argument-bag keys to request parts.
///
/// Declared order is authoritative: path replacement, query emission, and
/// body projection all follow it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ParamMapping {
    #[serde(default)]
    pub path_params: Option<Vec<String>>,
    #[serde(default)]
    pub query_params: Option<Vec<String>>,
    #[serde(default)]
    pub body_params: Option<Vec<String>>,
}

/// Authentication configuration of one operation.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthenticationSpec {
    /// Grant descriptor, e.g. `"oauth2.client_credentials"`.
    pub method: String,
    /// Argument-bag key carrying a caller-supplied bearer token. When the
    /// key is present and truthy, it takes precedence over the grant.
    #[serde(default)]
    pub accepting_instant_token: Option<String>,
}

impl AuthenticationSpec {
    /// Authentication through the given grant descriptor.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            accepting_instant_token: None,
        }
    }

    /// Also accept a caller-supplied token under the given key.
    pub fn with_instant_token_key(mut self, key: impl Into<String>) -> Self {
        self.accepting_instant_token = Some(key.into());
        self
    }
}
