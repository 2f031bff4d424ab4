use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::auth::gate::Deny;

/// Errors that surface as an HTTP error status. Everything else (validation,
/// missing documents, store failures) is reported in-band as an
/// acknowledged-false body by the handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("forbidden access")]
    Forbidden,
}

#[derive(Serialize)]
struct ErrorBody {
    error_code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match &self {
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),
        };
        let body = axum::Json(ErrorBody {
            error_code: code,
            message: msg,
        });
        (status, body).into_response()
    }
}

impl From<Deny> for ApiError {
    // Clients get one generic body whichever gate denied; the specific
    // reason is only logged server-side.
    fn from(_: Deny) -> Self {
        ApiError::Forbidden
    }
}
