//! HTTP mapping for `PerfError`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use perfwatch_core::error::{ClientCode, PerfError};

/// Wraps `PerfError` so handlers can return it directly.
#[derive(Debug)]
pub struct ApiError(pub PerfError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::UnsupportedVersion | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}: {}", code.as_str(), self.0),
        )
            .into_response()
    }
}
