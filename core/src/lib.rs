//! Observing HTTP transport decorator.
//!
//! # Overview
//! `LoggingTransport` wraps any [`Transport`] and calls a pre-call observer
//! before and a post-call observer after each exchange, returning the
//! delegate's outcome untouched. Unset members fall back to a [`Defaults`]
//! value: one injected at construction, or the process-wide provider.
//!
//! # Design
//! - Requests and responses are plain data (`http` module).
//! - The only failure type is `TransportError`; it may carry a partial
//!   response.
//! - Calls are synchronous and run on the caller's thread. `UreqTransport`
//!   is the stock blocking delegate.
//! - Default observers emit `tracing` events at `debug` on the
//!   `logging_transport` target.

pub mod client;
pub mod defaults;
pub mod error;
pub mod http;
pub mod logging;
pub mod observer;
pub mod transport;

pub use client::ServiceClient;
pub use defaults::Defaults;
pub use error::{ClientError, FailureKind, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use logging::{LoggingTransport, LoggingTransportBuilder};
pub use observer::{log_request, log_response, OnRequest, OnResponse};
pub use transport::{transport_fn, FnTransport, Transport, UreqTransport};
