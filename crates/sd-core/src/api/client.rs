//! HTTP plumbing over `ureq`.
//!
//! Every call is blocking and issued exactly once: no retry, no request
//! deduplication. A failure is classified as
//! - [`Error::Transport`] when the backend could not be reached,
//! - [`Error::Status`] for a non-success status,
//! - [`Error::Decode`] when a success body is not the expected JSON.

use sd_common::{Error, Result};
use sd_config::ClientConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// HTTP methods the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response whose status has not been judged yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed body; `Value::Null` when the body was empty.
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` (or `error`) string of the body, if any.
    pub fn message(&self) -> Option<String> {
        message_of(&self.body)
    }
}

fn message_of(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// `base_url` must not end with `/`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and return the status and body without judging the status.
    ///
    /// Only transport failures and non-JSON bodies are errors here.
    pub fn send_raw(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.url(path);
        let mut request = self.agent.request(method.as_str(), &url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        debug!(method = %method, url = %url, "request");

        let outcome = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };
        let response = match outcome {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(Error::Transport {
                    url,
                    reason: transport.to_string(),
                })
            }
        };

        let status = response.status();
        let text = response.into_string().map_err(|e| Error::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        trace!(status, bytes = text.len(), "response");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(json) => json,
                // Error pages are often HTML; keep the status meaningful.
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => {
                    return Err(Error::Decode {
                        url,
                        reason: e.to_string(),
                    })
                }
            }
        };
        Ok(RawResponse { status, body })
    }

    /// Issue a request and require a success status.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let raw = self.send_raw(method, path, query, body)?;
        if raw.is_success() {
            return Ok(raw.body);
        }
        Err(Error::Status {
            method: method.to_string(),
            url: self.url(path),
            status: raw.status,
            message: raw.message(),
        })
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let body = self.send(Method::Get, path, query, None)?;
        self.decode(path, body)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let json = serde_json::to_value(body)?;
        let body = self.send(Method::Post, path, &[], Some(&json))?;
        self.decode(path, body)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let json = serde_json::to_value(body)?;
        let body = self.send(Method::Put, path, &[], Some(&json))?;
        self.decode(path, body)
    }

    /// POST with an empty body.
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::Post, path, &[], None)?;
        self.decode(path, body)
    }

    /// DELETE; the response body is ignored.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::Delete, path, &[], None).map(|_| ())
    }

    /// Decode a success body. An empty body decodes as JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        serde_json::from_value(body).map_err(|e| Error::Decode {
            url: self.url(path),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_prefers_message_field() {
        let raw = RawResponse {
            status: 400,
            body: json!({"message": "중복된 이름", "error": "bad"}),
        };
        assert_eq!(raw.message().as_deref(), Some("중복된 이름"));
    }

    #[test]
    fn test_message_falls_back_to_error_field() {
        let raw = RawResponse {
            status: 500,
            body: json!({"message": "  ", "error": "db down"}),
        };
        assert_eq!(raw.message().as_deref(), Some("db down"));
        let empty = RawResponse {
            status: 500,
            body: Value::Null,
        };
        assert!(empty.message().is_none());
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new("http://localhost:4000", Duration::from_secs(1));
        assert_eq!(client.url("/api/skills"), "http://localhost:4000/api/skills");
    }

    #[test]
    fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = client.get::<Value>("/api/skills", &[]).unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "got {err:?}");
    }
}
