//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Failures reported by the outbound collaborators (block explorer, hosted
//! database) are described by [`ExternalServiceError`] and wrapped in
//! [`GatewayError::ExternalService`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: user is required",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure of a call to an external collaborator.
///
/// Never retried: the first failure surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ExternalServiceError {
    /// The request could not be sent or the connection failed.
    #[error("{service} request failed: {source}")]
    Transport {
        /// Collaborator name (e.g. `"etherscan"`).
        service: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The collaborator answered with a non-success HTTP status.
    #[error("{service} returned status {status}: {body}")]
    UnexpectedStatus {
        /// Collaborator name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The payload did not match the expected shape.
    #[error("{service} payload could not be decoded: {reason}")]
    Decode {
        /// Collaborator name.
        service: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// The collaborator answered but reported a failure status.
    #[error("{service} reported failure: {message}")]
    Remote {
        /// Collaborator name.
        service: &'static str,
        /// Message reported by the collaborator.
        message: String,
    },
}

impl ExternalServiceError {
    /// Returns the name of the collaborator that failed.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::UnexpectedStatus { service, .. }
            | Self::Decode { service, .. }
            | Self::Remote { service, .. } => service,
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                         |
/// |-----------|-----------------|-------------------------------------|
/// | 1000–1999 | Client input    | 400 Bad Request / 401 Unauthorized  |
/// | 2000–2999 | Not Found       | 404 Not Found                       |
/// | 3000–3999 | Server          | 500 / 502 / 503                     |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required input was missing or malformed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The request carried no bearer token.
    #[error("missing bearer token")]
    Unauthorized,

    /// No entity of the given kind exists for the id.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. `"episode"`).
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Required external configuration is absent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A collaborator call failed.
    #[error("external service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    /// A collaborator could not be constructed at startup.
    #[error("dependency not initialized: {0}")]
    UninitializedDependency(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Shorthand for [`GatewayError::NotFound`].
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Unauthorized => 1401,
            Self::NotFound { .. } => 2001,
            Self::Internal(_) => 3000,
            Self::Config(_) => 3002,
            Self::ExternalService(_) => 3003,
            Self::UninitializedDependency(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::UninitializedDependency(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let details = match &self {
            Self::ExternalService(inner) => Some(inner.service().to_string()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = GatewayError::Validation("user is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
        assert!(err.to_string().contains("user is required"));
    }

    #[test]
    fn not_found_names_kind_and_id() {
        let err = GatewayError::not_found("episode", "ke902");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "episode not found: ke902");
    }

    #[test]
    fn external_service_keeps_cause() {
        let err: GatewayError = ExternalServiceError::Remote {
            service: "etherscan",
            message: "NOTOK".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("etherscan reported failure: NOTOK"));
    }

    #[test]
    fn uninitialized_dependency_is_unavailable() {
        let err = GatewayError::UninitializedDependency("user episode store".to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), 3004);
    }

    #[tokio::test]
    async fn into_response_renders_error_body() {
        let response = GatewayError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(json) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("body is not json");
        };
        assert_eq!(json["error"]["code"], 1401);
        assert!(json["error"].get("details").is_none());
    }
}
