//! The `Transport` capability and the stock blocking implementation.
//!
//! # Design
//! A transport turns one `HttpRequest` into exactly one outcome: a response
//! or a `TransportError`. Non-2xx statuses are responses, not failures;
//! interpreting them is the caller's business. `UreqTransport` is the default
//! delegate and runs the exchange on the calling thread.

use std::fmt;
use std::io;
use std::sync::Arc;

use ureq::http;

use crate::error::{FailureKind, TransportError};
use crate::http::{HttpRequest, HttpResponse};

/// Anything that can execute an HTTP request.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// A transport backed by a closure. See [`transport_fn`].
#[derive(Clone)]
pub struct FnTransport<F> {
    f: F,
}

/// Wrap a closure as a `Transport`.
pub fn transport_fn<F>(f: F) -> FnTransport<F>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    FnTransport { f }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (self.f)(request)
    }
}

/// Blocking transport on top of a `ureq::Agent`.
///
/// The agent is configured to hand back 4xx/5xx responses as data rather than
/// `Err`, so the only failures reported are the ones where no complete
/// response exists.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent. Its `http_status_as_error` setting is
    /// respected as-is.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn run<B: ureq::AsSendBody>(
        &self,
        request: &HttpRequest,
        body: B,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let outgoing = builder
            .body(body)
            .map_err(|e| TransportError::new(FailureKind::InvalidRequest, e.to_string()))?;

        let mut response = self.agent.run(outgoing)?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // No size cap, and bytes that are not UTF-8 are replaced rather than
        // failing an exchange that completed.
        match response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
        {
            Ok(bytes) => Ok(HttpResponse {
                status,
                headers,
                body: String::from_utf8_lossy(&bytes).into_owned(),
                url: request.url.clone(),
            }),
            Err(e) => Err(TransportError::from(e).with_partial_response(HttpResponse {
                status,
                headers,
                body: String::new(),
                url: request.url.clone(),
            })),
        }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match &request.body {
            Some(body) => self.run(request, body.as_str()),
            None => self.run(request, ()),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        let kind = match &err {
            ureq::Error::Io(e) => io_failure_kind(e.kind()),
            ureq::Error::Timeout(_) => FailureKind::Timeout,
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => FailureKind::Connect,
            ureq::Error::BadUri(_) | ureq::Error::Http(_) => FailureKind::InvalidRequest,
            ureq::Error::Protocol(_) => FailureKind::Protocol,
            _ => FailureKind::Other,
        };
        TransportError::new(kind, err.to_string())
    }
}

fn io_failure_kind(kind: io::ErrorKind) -> FailureKind {
    match kind {
        io::ErrorKind::ConnectionRefused => FailureKind::ConnectionRefused,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => FailureKind::Connect,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => FailureKind::Timeout,
        _ => FailureKind::Io,
    }
}
