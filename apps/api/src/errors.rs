use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ebook::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each endpoint family keeps the body shape its browser client reads:
/// ebook failures answer `{success, message}`, everything else `{error, ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request body was missing, not JSON, or the wrong shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Any ebook failure outside the renderer itself, request body included.
    #[error("Ebook error: {0}")]
    Ebook(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The model answered, but not with a usable scene list.
    #[error("{message}")]
    AssistantOutput {
        message: String,
        assistant_response: String,
    },

    #[error("Image generation error: {0}")]
    ImageGeneration(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidBody(rejection) => {
                (rejection.status(), json!({ "error": rejection.body_text() }))
            }
            AppError::Ebook(msg) => {
                tracing::error!("Failed to generate PDF: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": msg }),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Error generating storyboard", "details": msg }),
                )
            }
            AppError::AssistantOutput {
                message,
                assistant_response,
            } => {
                tracing::error!(%assistant_response, "Unusable assistant output: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "assistantResponse": assistant_response }),
                )
            }
            AppError::ImageGeneration(msg) => {
                tracing::error!("Image generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Image generation failed", "details": msg }),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Failed to generate PDF: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// `Json` extractor whose rejections answer through `AppError` as `{error}`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
