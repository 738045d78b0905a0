//! The seam between the client and whatever actually performs HTTP.
//!
//! # Design
//! The core never opens a socket. A `Transport` receives a fully built
//! `HttpRequest` and reports the outcome through a one-shot completion. It
//! owns the scheduling: it may complete on a worker thread, on an event
//! loop, or inline before `execute` returns. Timeouts, TLS and connection
//! reuse are its business too.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// One-shot continuation a transport calls when the round-trip settles.
pub type TransportCompletion = Box<dyn FnOnce(Result<HttpResponse, ApiError>) + Send + 'static>;

pub trait Transport {
    /// Start `request` and eventually call `completion` with the raw response
    /// (any status) or an `ApiError::Transport` describing why no response
    /// arrived.
    fn execute(&self, request: HttpRequest, completion: TransportCompletion);
}

/// Any blocking `Fn(HttpRequest) -> Result<HttpResponse, ApiError>` is a
/// transport that completes inline on the caller's thread.
impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest, completion: TransportCompletion) {
        completion(self(request));
    }
}
