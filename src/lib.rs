//! # Remote Entity
//!
//! Declarative HTTP API client: describe an entity's remote operations as
//! configuration, get back a handle that invokes them by name.
//!
//! Each operation declares a verb, a URL template with `:key`
//! placeholders, an optional mapping of argument-bag keys onto path,
//! query, and body parameters, and optional authentication. Invoking an
//! operation resolves the URL and body from the argument bag, attaches an
//! `Authorization` header when configured (a caller-supplied instant
//! token wins over a fetched OAuth2 client-credentials token), executes
//! the request, and surfaces the parsed JSON response when the operation
//! declares it.
//!
//! # Example
//!
//! ```rust,no_run
//! use remote_entity::{
//!     AuthenticationSpec, EntityConfigBuilder, HttpMethod, MethodSpecBuilder, RemoteEntity,
//! };
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EntityConfigBuilder::new()
//!         .name("User")
//!         .method(
//!             MethodSpecBuilder::new()
//!                 .name("get_user_posts")
//!                 .url("https://example.com/users/:id/posts")
//!                 .path_params(["id"])
//!                 .query_params(["page"])
//!                 .authentication(
//!                     AuthenticationSpec::new("oauth2.client_credentials")
//!                         .with_instant_token_key("user_token"),
//!                 )
//!                 .returns_body(true)
//!                 .build()?,
//!         )
//!         .method(
//!             MethodSpecBuilder::new()
//!                 .name("create_user")
//!                 .url("https://example.com/users")
//!                 .http_method(HttpMethod::Post)
//!                 .body_params(["name", "email"])
//!                 .build()?,
//!         )
//!         .build()?;
//!
//!     let entity = RemoteEntity::configure(config)?;
//!
//!     let posts = entity
//!         .invoke("get_user_posts", json!({"id": 1, "page": 2}))
//!         .await?;
//!     println!("{posts:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - `types`: operation specs, entity configuration, token wire types
//! - `error`: error hierarchy
//! - `core`: transport seam (request/response descriptors, reqwest and
//!   mock transports)
//! - `params`: path, query, and body parameter mapping
//! - `auth`: authorization-header resolution and token acquisition
//! - `request`: request assembly
//! - `entity`: the operation registry and invocation path
//! - `builders`: fluent configuration builders

#![warn(clippy::all)]

pub mod auth;
pub mod builders;
pub mod core;
pub mod entity;
pub mod error;
pub mod params;
pub mod request;
pub mod types;

// Re-export the entity handle
pub use entity::RemoteEntity;

// Re-export builders
pub use builders::{EntityConfigBuilder, MethodSpecBuilder};

// Re-export errors
pub use error::{
    AuthProviderError, ConfigurationError, InvalidArgumentError, RemoteEntityError,
    RemoteEntityResult, TransportError,
};

// Re-export types
pub use types::{
    AuthProviders, AuthenticationSpec, EntityConfig, MethodSpec, OAuth2Provider, ParamMapping,
    TokenResponse,
};

// Re-export core components
pub use crate::core::{
    HttpMethod, HttpTransport, MockTransport, ReqwestTransport, RequestDescriptor,
    ResponseDescriptor, DEFAULT_TIMEOUT_SECS,
};

// Re-export auth components
pub use auth::{AuthResolver, ClientCredentialsTokenFetcher, MockTokenFetcher, TokenFetcher};

// Re-export request assembly
pub use params::ArgumentBag;
pub use request::RequestBuilder;
