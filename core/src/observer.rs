//! Observer hooks and the stock diagnostic observers.
//!
//! Hooks are diagnostic only. Each one is run through [`isolate`], so a hook
//! that panics is reported and then ignored; it can never change the outcome
//! of the exchange it was watching.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// `tracing` target for every event this crate emits.
pub const LOG_TARGET: &str = "logging_transport";

/// Pre-call observer.
pub type OnRequest = Arc<dyn Fn(&HttpRequest) + Send + Sync>;

/// Post-call observer. On success it sees `(Some(response), None)`; on
/// failure `(partial, Some(error))`, where `partial` may be `None`.
pub type OnResponse = Arc<dyn Fn(Option<&HttpResponse>, Option<&TransportError>) + Send + Sync>;

/// Default pre-call observer.
pub fn log_request(request: &HttpRequest) {
    tracing::debug!(
        target: LOG_TARGET,
        method = %request.method,
        url = %request.url,
        "---> {} {}",
        request.method,
        request.url
    );
}

/// Default post-call observer. Tolerates a missing response.
pub fn log_response(response: Option<&HttpResponse>, failure: Option<&TransportError>) {
    let err = failure.map(ToString::to_string);
    match response {
        Some(resp) => tracing::debug!(
            target: LOG_TARGET,
            status = resp.status,
            url = %resp.url,
            "<--- {} {} err={:?}, headers={:?}, body={} bytes",
            resp.status,
            resp.url,
            err,
            resp.headers,
            resp.body.len()
        ),
        None => tracing::debug!(target: LOG_TARGET, "<--- (no response) err={:?}", err),
    }
}

/// Run `hook`, swallowing a panic after logging it once.
pub(crate) fn isolate(hook: &'static str, f: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        tracing::warn!(target: LOG_TARGET, hook, %reason, "observer hook panicked; ignoring");
    }
}
