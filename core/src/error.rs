//! Error types.
//!
//! # Design
//! `TransportError` is the only failure a transport reports. The decorator
//! passes it through untouched, so it carries everything a caller or an
//! observer might want: a coarse `FailureKind`, the underlying message, and
//! whatever part of the response had already arrived when the exchange broke.

use thiserror::Error;

use crate::http::HttpResponse;

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureKind {
    #[error("connection refused")]
    ConnectionRefused,

    /// DNS failure, reset, or any other connection-level problem.
    #[error("connection failed")]
    Connect,

    #[error("timed out")]
    Timeout,

    /// The request could not be turned into a valid HTTP message.
    #[error("invalid request")]
    InvalidRequest,

    #[error("protocol error")]
    Protocol,

    #[error("i/o error")]
    Io,

    #[error("transport error")]
    Other,
}

/// A failure surfaced by a transport's `execute`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: FailureKind,
    message: String,
    partial: Option<Box<HttpResponse>>,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            partial: None,
        }
    }

    /// Attach the part of the response that arrived before the failure.
    pub fn with_partial_response(mut self, response: HttpResponse) -> Self {
        self.partial = Some(Box::new(response));
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn partial_response(&self) -> Option<&HttpResponse> {
        self.partial.as_deref()
    }

    pub fn into_partial_response(self) -> Option<HttpResponse> {
        self.partial.map(|resp| *resp)
    }
}

/// Errors returned by `ServiceClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
