//! Request handlers.

pub mod chapters;
pub mod health;
pub mod songs;
pub mod study;

pub use chapters::*;
pub use health::*;
pub use songs::*;
pub use study::*;

use axum::Extension;
use cise_broker::RequestLogger;

use crate::middleware::RequestId;

/// Logger bound to the request's id, or a fresh id outside the middleware stack.
fn request_logger(request_id: Option<Extension<RequestId>>, operation: &str) -> RequestLogger {
    match request_id {
        Some(Extension(RequestId(id))) => RequestLogger::with_id(&id, operation),
        None => RequestLogger::new(operation),
    }
}
