//! Fallback delegate and observers.
//!
//! # Design
//! `Defaults` is a plain value. A `LoggingTransport` either holds one it was
//! given at construction or falls back to the process-wide provider returned
//! by [`Defaults::global`]. The provider is a `OnceLock`: it can be replaced
//! with [`install`] at most once, before anything reads it, and is read-only
//! from then on. Per-instance policy belongs in a configured transport, not in
//! the global.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::observer::{self, OnRequest, OnResponse};
use crate::transport::{Transport, UreqTransport};

static GLOBAL: OnceLock<Defaults> = OnceLock::new();

/// The delegate and observers used when a `LoggingTransport` leaves one unset.
#[derive(Clone)]
pub struct Defaults {
    pub transport: Arc<dyn Transport>,
    pub on_request: OnRequest,
    pub on_response: OnResponse,
}

impl Defaults {
    /// ureq transport plus the `debug`-level observers.
    pub fn standard() -> Self {
        Self {
            transport: Arc::new(UreqTransport::new()),
            on_request: Arc::new(observer::log_request),
            on_response: Arc::new(observer::log_response),
        }
    }

    /// The process-wide provider, initialised with [`Defaults::standard`] on
    /// first use unless [`install`] ran earlier.
    pub fn global() -> &'static Defaults {
        GLOBAL.get_or_init(Defaults::standard)
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_on_request(mut self, on_request: OnRequest) -> Self {
        self.on_request = on_request;
        self
    }

    pub fn with_on_response(mut self, on_response: OnResponse) -> Self {
        self.on_response = on_response;
        self
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults").finish_non_exhaustive()
    }
}

/// Replace the process-wide provider.
///
/// Succeeds only if the provider has not been installed or read yet; otherwise
/// `defaults` is handed back and the existing provider stays in place.
pub fn install(defaults: Defaults) -> Result<(), Defaults> {
    let result = GLOBAL.set(defaults);
    if result.is_err() {
        tracing::warn!(
            target: observer::LOG_TARGET,
            "process-wide defaults already initialised; install ignored"
        );
    }
    result
}
