//! Structured request logging utilities.
//!
//! Provides consistent, structured logging for broker operations with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Request logger for structured logging with consistent formatting.
///
/// Every event carries the request id and the operation name, so the
/// lines of one chapter or song request can be grepped together.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    request_id: String,
    operation: String,
}

impl RequestLogger {
    /// Create a logger with a fresh request id.
    pub fn new(operation: &str) -> Self {
        Self::with_id(&Uuid::new_v4().to_string(), operation)
    }

    /// Create a logger for an existing request id (e.g. from `X-Request-ID`).
    pub fn with_id(request_id: &str, operation: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            operation = %self.operation,
            "Request started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            operation = %self.operation,
            "Request progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            request_id = %self.request_id,
            operation = %self.operation,
            "Request warning: {}", message
        );
    }

    /// Log a per-item failure that was contained and replaced.
    ///
    /// Distinct from [`log_error`](Self::log_error), which marks the whole
    /// request as failed.
    pub fn log_recovered(&self, item: &str, reason: &str) {
        warn!(
            request_id = %self.request_id,
            operation = %self.operation,
            item = %item,
            recovered = true,
            "Recovered failure for '{}': {}", item, reason
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            request_id = %self.request_id,
            operation = %self.operation,
            "Request error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            operation = %self.operation,
            "Request completed: {}", message
        );
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this request.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            operation = %self.operation
        )
    }
}
