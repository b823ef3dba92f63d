use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::error::{CompareError, InputError};
use crate::web::render;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("comparison not found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Compare(CompareError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Compare(CompareError::BudgetExceeded { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = render::render_error(status.as_u16(), &self.to_string());
        (status, Html(body)).into_response()
    }
}
