//! Core Infrastructure
//!
//! The transport seam between built requests and the HTTP client.

pub mod transport;

pub use transport::{
    HttpMethod, HttpTransport, MockTransport, ReqwestTransport, RequestDescriptor,
    ResponseDescriptor, DEFAULT_TIMEOUT_SECS,
};
