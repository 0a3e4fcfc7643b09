//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;

use crate::session::SessionError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The request body, path or query string could not be extracted.
    Rejected { status: StatusCode, message: String },
    /// Session command was turned down.
    Session(SessionError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected { status, message } => (status, message),
            ApiError::Session(err) => session_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        if status.is_client_error() {
            tracing::warn!(%status, error = %message, "request rejected");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn session_error_to_response(err: SessionError) -> (StatusCode, String) {
    match &err {
        SessionError::UnknownProduct(_) => (StatusCode::NOT_FOUND, err.to_string()),
        SessionError::Delivery(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        SessionError::Checkout(checkout_err) => match checkout_err {
            CheckoutError::InvalidQuantity => (StatusCode::BAD_REQUEST, err.to_string()),
            CheckoutError::LineNotInCart { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            CheckoutError::TotalOverflow => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            CheckoutError::AlreadyInProgress { .. }
            | CheckoutError::NotCollectingDetails { .. }
            | CheckoutError::NoCheckoutInProgress => (StatusCode::CONFLICT, err.to_string()),
        },
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout::CheckoutState;
    use domain::DeliveryForm;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let err = SessionError::UnknownProduct("404".into());
        assert_eq!(status_of(err.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_incomplete_form_is_unprocessable() {
        let err = DeliveryForm::default().validate().unwrap_err();
        assert_eq!(
            status_of(SessionError::from(err).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_checkout_state_errors_conflict() {
        let err = CheckoutError::AlreadyInProgress {
            state: CheckoutState::CollectingDetails,
        };
        assert_eq!(
            status_of(SessionError::from(err).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SessionError::from(CheckoutError::NoCheckoutInProgress).into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_checkout_selection_errors() {
        let err = CheckoutError::LineNotInCart {
            product_id: "7".into(),
        };
        assert_eq!(status_of(SessionError::from(err).into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(SessionError::from(CheckoutError::TotalOverflow).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_extractor_rejection_keeps_status() {
        let err = ApiError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(status_of(err), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_internal_error() {
        assert_eq!(
            status_of(ApiError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request() {
        assert_eq!(
            status_of(ApiError::BadRequest("bad id".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
