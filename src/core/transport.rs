//! HTTP Transport
//!
//! Transport interface and implementations. TLS, redirects, and
//! connection reuse are the transport's business; callers hand it a
//! fully built request descriptor and get back status, headers, and body.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{ConfigurationError, TransportError};

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP verb of a configured operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ConfigurationError::UnsupportedHttpMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Fully built outbound request. Owned by the call that produced it and
/// discarded once the transport has consumed it.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Resolved URL, placeholders and query string included.
    pub url: String,
    /// Headers in emission order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Case-insensitive header lookup; first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request body parsed as JSON, when present.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// Response surfaced by the transport.
#[derive(Clone, Debug)]
pub struct ResponseDescriptor {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, lowercased keys, in received order.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl ResponseDescriptor {
    /// A response with the given status and JSON body, mostly useful in
    /// tests.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![(
                "content-type".to_string(),
                "application/json".to_string(),
            )],
            body: body.to_string().into_bytes(),
        }
    }

    /// A response with the given status and no body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request and surface the raw response.
    async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor, TransportError>;
}

/// Default reqwest-based transport.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: self.timeout,
                }
            } else {
                TransportError::ConnectionFailed {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();

        let mut headers = Vec::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.push((name.as_str().to_lowercase(), v.to_string()));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::ReadFailed {
                message: e.to_string(),
            })?;

        Ok(ResponseDescriptor {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Mock transport for tests: queued responses, recorded requests.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ResponseDescriptor>>,
    default_response: Mutex<Option<ResponseDescriptor>>,
    history: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; responses are served in FIFO order.
    pub fn queue_response(&self, response: ResponseDescriptor) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue a JSON response with the given status.
    pub fn queue_json_response(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.queue_response(ResponseDescriptor::json(status, body))
    }

    /// Response served once the queue is drained.
    pub fn set_default_response(&self, response: ResponseDescriptor) -> &Self {
        *self.default_response.lock().unwrap() = Some(response);
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.history.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.history.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor, TransportError> {
        self.history.lock().unwrap().push(request);

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.default_response.lock().unwrap().clone());

        response.ok_or_else(|| TransportError::ConnectionFailed {
            message: "no mock response queued".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_http_method_from_str_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_http_method_deserializes_from_uppercase() {
        let method: HttpMethod = serde_json::from_str("\"PUT\"").unwrap();
        assert_eq!(method, HttpMethod::Put);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = RequestDescriptor {
            method: HttpMethod::Get,
            url: "https://example.com".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_mock_transport_serves_fifo_and_records_history() {
        let transport = MockTransport::new();
        transport.queue_json_response(200, &json!({"first": true}));
        transport.queue_json_response(201, &json!({"second": true}));

        let request = RequestDescriptor {
            method: HttpMethod::Get,
            url: "https://example.com/a".to_string(),
            headers: Vec::new(),
            body: None,
        };

        let first = transport.execute(request.clone()).await.unwrap();
        assert_eq!(first.status, 200);
        let second = transport.execute(request).await.unwrap();
        assert_eq!(second.status, 201);

        let history = transport.requests();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_mock_transport_errors_when_nothing_queued() {
        let transport = MockTransport::new();
        let request = RequestDescriptor {
            method: HttpMethod::Get,
            url: "https://example.com".to_string(),
            headers: Vec::new(),
            body: None,
        };

        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, TransportError::ConnectionFailed { .. }));
    }
}
