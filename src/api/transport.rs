//! HTTP transport for the Teambox REST API.
//!
//! The client builds [`ApiRequest`]s and hands them to a [`Transport`], which
//! returns the parsed JSON body. [`HttpTransport`] is the ureq-backed
//! implementation; tests substitute their own.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The verb as sent on the request line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully built request: absolute URL, headers and optional form body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form fields, sent `application/x-www-form-urlencoded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<Vec<(String, String)>>,
}

/// Sends requests and returns the parsed response body.
pub trait Transport {
    /// Performs `request`. An empty body comes back as `Value::Null`.
    fn send(&self, request: &ApiRequest) -> Result<Value>;
}

/// [`Transport`] over a blocking ureq agent.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Creates a transport whose calls time out after `timeout` overall.
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

/// Applies every header of an [`ApiRequest`] to a ureq request builder.
///
/// A macro because `get`/`delete` and `post`/`put` return differently typed
/// builders.
macro_rules! with_headers {
    ($builder:expr, $request:expr) => {{
        let mut builder = $builder;
        for (name, value) in &$request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }};
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = request.url.as_str();
        let form = request.form.clone().unwrap_or_default();

        let mut response = match request.method {
            Method::Get => with_headers!(self.agent.get(url), request).call()?,
            Method::Delete => with_headers!(self.agent.delete(url), request).call()?,
            Method::Post => with_headers!(self.agent.post(url), request).send_form(form)?,
            Method::Put => with_headers!(self.agent.put(url), request).send_form(form)?,
        };

        let body = response.body_mut().read_to_string()?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Accepts a single connection, answers it with `response` and returns
    /// the request it received, lower-cased.
    fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let root = format!("http://{}/api/1", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received).to_lowercase();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .map(|v| v.trim().parse::<usize>().unwrap())
                        .unwrap_or(0);
                    if received.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&received).to_lowercase()
        });
        (root, handle)
    }

    #[test]
    fn test_put_sends_form_and_maps_empty_body_to_null() {
        let (root, server) =
            serve_once("HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        let request = ApiRequest {
            method: Method::Put,
            url: format!("{}/organizations/4/memberships/7", root),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            form: Some(vec![("role".to_string(), "30".to_string())]),
        };

        let value = HttpTransport::new(Duration::from_secs(5)).send(&request).unwrap();
        assert!(value.is_null());

        let received = server.join().unwrap();
        assert!(received.starts_with("put /api/1/organizations/4/memberships/7 "));
        assert!(received.contains("content-type: application/x-www-form-urlencoded"));
        assert!(received.contains("accept: application/json"));
        assert!(received.ends_with("role=30"));
    }

    #[test]
    fn test_get_parses_json_body() {
        let body = r#"{"objects": [], "references": []}"#;
        let response: &'static str = Box::leak(
            format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .into_boxed_str(),
        );
        let (root, server) = serve_once(response);
        let request = ApiRequest {
            method: Method::Get,
            url: format!("{}/activities", root),
            headers: vec![],
            form: None,
        };

        let value = HttpTransport::new(Duration::from_secs(5)).send(&request).unwrap();
        assert_eq!(value, serde_json::json!({"objects": [], "references": []}));
        assert!(server.join().unwrap().starts_with("get /api/1/activities "));
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_request_serialization_skips_empty_form() {
        let request = ApiRequest {
            method: Method::Get,
            url: "https://teambox.com/api/1/projects".to_string(),
            headers: vec![],
            form: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("form").is_none());
        assert_eq!(json["method"], "Get");
    }
}
