//! Minimal service client that owns a swappable transport.
//!
//! # Design
//! `ServiceClient` knows a base URL and a transport, nothing else. Request
//! building and sending are separate steps so callers can inspect or tweak a
//! request before it goes out. [`ServiceClient::enable_http_logging`] is the
//! wiring point that puts a `LoggingTransport` in front of whatever transport
//! the client already has.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ClientError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::logging::LoggingTransport;
use crate::transport::Transport;

#[derive(Clone)]
pub struct ServiceClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ServiceClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// `path` is appended to the base URL and should start with `/`.
    pub fn build_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.base_url))
    }

    pub fn build_json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body)?;
        Ok(self
            .build_request(method, path)
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.execute(request)
    }

    /// Route every call through a `LoggingTransport` with the default
    /// observers, delegating to the current transport.
    pub fn enable_http_logging(&mut self) {
        let current = Arc::clone(&self.transport);
        self.transport = Arc::new(LoggingTransport::wrap(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::capture::with_logs;
    use crate::transport::transport_fn;

    fn echo_transport() -> Arc<dyn Transport> {
        Arc::new(transport_fn(|req: &HttpRequest| {
            Ok(HttpResponse {
                status: 200,
                headers: req.headers.clone(),
                body: req.body.clone().unwrap_or_default(),
                url: req.url.clone(),
            })
        }))
    }

    fn client() -> ServiceClient {
        ServiceClient::new("http://localhost:3000", echo_transport())
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ServiceClient::new("http://localhost:3000/", echo_transport());
        let req = client.build_request(HttpMethod::Get, "/v1/resource");
        assert_eq!(req.url, "http://localhost:3000/v1/resource");
    }

    #[test]
    fn build_request_has_no_body_or_headers() {
        let req = client().build_request(HttpMethod::Delete, "/v1/items/1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_json_request_sets_content_type_and_body() {
        let req = client()
            .build_json_request(HttpMethod::Post, "/v1/items", &serde_json::json!({"name": "widget"}))
            .unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "widget");
    }

    #[test]
    fn send_uses_current_transport() {
        let client = client();
        let req = client.build_request(HttpMethod::Post, "/v1/items").with_body("payload");
        let resp = client.send(&req).unwrap();
        assert_eq!(resp.body, "payload");
    }

    #[test]
    fn enable_http_logging_keeps_responses_and_emits_lines() {
        let mut client = client();
        client.enable_http_logging();

        let req = client.build_request(HttpMethod::Get, "/v1/resource").with_body("ok");
        let (resp, logs) = with_logs(tracing::Level::DEBUG, || client.send(&req));

        assert_eq!(resp.unwrap().body, "ok");
        assert!(logs.contains("---> GET http://localhost:3000/v1/resource"), "{logs}");
        assert!(logs.contains("<--- 200 http://localhost:3000/v1/resource"), "{logs}");
    }
}
