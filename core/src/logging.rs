//! `LoggingTransport`: a transport decorator with pre/post-call observers.
//!
//! # Design
//! Every call runs the same four steps on the caller's thread: pre-call
//! observer, delegate, post-call observer, return. The delegate's outcome is
//! returned exactly as produced. Observers only ever borrow it, and a
//! panicking observer is contained by `observer::isolate`.
//!
//! Each member left unset is resolved per call against the injected
//! `Defaults`, or the process-wide provider when none was injected.

use std::fmt;
use std::sync::Arc;

use crate::defaults::Defaults;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::observer::{isolate, OnRequest, OnResponse};
use crate::transport::Transport;

/// Decorates a delegate transport with request/response observers.
///
/// Cheap to clone; all members are shared. Safe to use from many threads as
/// long as the delegate and observers are.
#[derive(Clone, Default)]
pub struct LoggingTransport {
    delegate: Option<Arc<dyn Transport>>,
    on_request: Option<OnRequest>,
    on_response: Option<OnResponse>,
    defaults: Option<Arc<Defaults>>,
}

impl LoggingTransport {
    /// A transport with nothing configured: every call goes through the
    /// process-wide defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `delegate`, keeping the default observers.
    pub fn wrap(delegate: Arc<dyn Transport>) -> Self {
        Self::builder().delegate(delegate).build()
    }

    pub fn builder() -> LoggingTransportBuilder {
        LoggingTransportBuilder::default()
    }

    /// Run `request` through the observers and the delegate.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let defaults = self.defaults();

        let on_request = self.on_request.as_ref().unwrap_or(&defaults.on_request);
        isolate("on_request", || on_request(request));

        let delegate = self.delegate.as_ref().unwrap_or(&defaults.transport);
        let outcome = delegate.execute(request);

        let on_response = self.on_response.as_ref().unwrap_or(&defaults.on_response);
        match &outcome {
            Ok(resp) => isolate("on_response", || on_response(Some(resp), None)),
            Err(err) => isolate("on_response", || {
                on_response(err.partial_response(), Some(err))
            }),
        }

        outcome
    }

    fn defaults(&self) -> &Defaults {
        match &self.defaults {
            Some(defaults) => defaults.as_ref(),
            None => Defaults::global(),
        }
    }
}

impl Transport for LoggingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        LoggingTransport::execute(self, request)
    }
}

impl fmt::Debug for LoggingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingTransport")
            .field("delegate", &self.delegate.is_some())
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("defaults", &self.defaults.is_some())
            .finish()
    }
}

/// Builder for [`LoggingTransport`]. Anything not set falls back to the
/// defaults at call time.
#[derive(Default)]
pub struct LoggingTransportBuilder {
    inner: LoggingTransport,
}

impl LoggingTransportBuilder {
    pub fn delegate(mut self, delegate: Arc<dyn Transport>) -> Self {
        self.inner.delegate = Some(delegate);
        self
    }

    pub fn on_request<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) + Send + Sync + 'static,
    {
        self.inner.on_request = Some(Arc::new(f));
        self
    }

    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&HttpResponse>, Option<&TransportError>) + Send + Sync + 'static,
    {
        self.inner.on_response = Some(Arc::new(f));
        self
    }

    /// Fall back on `defaults` instead of the process-wide provider.
    pub fn defaults(mut self, defaults: Arc<Defaults>) -> Self {
        self.inner.defaults = Some(defaults);
        self
    }

    pub fn build(self) -> LoggingTransport {
        self.inner
    }
}
