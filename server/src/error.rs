//! Mapping from service errors to HTTP responses.
//!
//! Client errors carry their `TodoError` text as a plain-text body. Store
//! failures are logged and answered with a generic 500 so SQL details never
//! reach the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use todo_core::TodoError;

/// A `TodoError` on its way out as a response.
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            TodoError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(value: TodoError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.0 {
            TodoError::Store(err) => {
                error!("event=request module=http status=error code={} error={err}", status.as_u16());
                (status, "Internal Server Error").into_response()
            }
            err => {
                warn!("event=request module=http status=rejected code={} reason=\"{err}\"", status.as_u16());
                (status, err.to_string()).into_response()
            }
        }
    }
}
