//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use cise_broker::BrokerError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limited")]
    RateLimited,

    /// A broker failure. `redact_upstream` hides upstream details from the
    /// response body; it is set from [`ApiConfig::is_production`](crate::ApiConfig::is_production).
    #[error("{error}")]
    Broker {
        #[source]
        error: BrokerError,
        redact_upstream: bool,
    },
}

impl ApiError {
    pub fn broker(error: BrokerError, redact_upstream: bool) -> Self {
        Self::Broker {
            error,
            redact_upstream,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Broker { error, .. } if error.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Broker {
                error: BrokerError::SongNotFound(_),
                ..
            } => StatusCode::NOT_FOUND,
            ApiError::Broker { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::Broker { error, .. } => Some(error.code()),
            ApiError::RateLimited => None,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Broker {
                error: BrokerError::Upstream(_),
                redact_upstream: true,
            } => "An upstream service error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail(),
            code: self.code(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cise_broker::UpstreamError;
    use cise_genai::GenAiError;

    fn upstream() -> BrokerError {
        BrokerError::Upstream(UpstreamError::Generation(GenAiError::request_failed(
            "connect to 10.0.0.7:443 refused",
        )))
    }

    #[test]
    fn test_broker_status_mapping() {
        let cases = [
            (BrokerError::invalid_query("empty"), StatusCode::BAD_REQUEST),
            (BrokerError::invalid_request("blank"), StatusCode::BAD_REQUEST),
            (BrokerError::SongNotFound("x".into()), StatusCode::NOT_FOUND),
            (BrokerError::NoTopicsGenerated, StatusCode::BAD_GATEWAY),
            (BrokerError::NoContentGenerated, StatusCode::BAD_GATEWAY),
            (BrokerError::DownloadLinkUnavailable("x".into()), StatusCode::BAD_GATEWAY),
            (BrokerError::empty_generation("notes"), StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::broker(err, false).status_code(), status);
        }
    }

    #[test]
    fn test_error_keeps_code() {
        let err = ApiError::broker(BrokerError::SongNotFound("x".into()), true);
        assert_eq!(err.code(), Some("song_not_found"));
        assert_eq!(ApiError::RateLimited.code(), None);
    }

    #[test]
    fn test_upstream_detail_redaction() {
        let hidden = ApiError::broker(upstream(), true);
        assert_eq!(hidden.detail(), "An upstream service error occurred");
        assert_eq!(hidden.code(), Some("upstream_service_error"));

        let shown = ApiError::broker(upstream(), false);
        assert!(shown.detail().contains("10.0.0.7"));
    }

    #[test]
    fn test_client_errors_are_never_redacted() {
        let err = ApiError::broker(BrokerError::SongNotFound("Shape of You".into()), true);
        assert!(err.detail().contains("Shape of You"));
    }
}
