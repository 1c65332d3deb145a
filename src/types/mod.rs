//! Data Types
//!
//! Configuration and wire types shared across the crate.

pub mod config;
pub mod spec;
pub mod token;

pub use config::{AuthProviders, EntityConfig, OAuth2Provider};
pub use spec::{AuthenticationSpec, MethodSpec, ParamMapping};
pub use token::TokenResponse;
