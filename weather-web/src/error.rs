//! Faults that escape a handler.
//!
//! Users only ever see the static 500 page; details go to the log.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;
use tracing::error;

use crate::render::server_error_page;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to render page: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        internal_error_response()
    }
}

/// Response for panics caught by `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = %detail, "Request handler panicked");
    internal_error_response()
}

fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(server_error_page())).into_response()
}
