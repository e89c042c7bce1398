//! Axum route handler for the Ebook API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::ebook::{compose, Document};
use crate::errors::AppError;
use crate::state::AppState;

const FALLBACK_FILENAME: &str = "ebook";

/// POST /generate-ebook
///
/// Lays out the request as a paginated PDF and returns it as an attachment.
/// The bytes are served straight from memory; nothing is staged on disk.
/// Every failure, an unreadable body included, answers 500 `{success: false, message}`.
pub async fn handle_generate_ebook(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(document) = payload.map_err(|e| AppError::Ebook(e.body_text()))?;
    let filename = attachment_filename(&document.title);
    let layout = state.layout.clone();
    let chapters = document.chapters.len();

    let bytes = tokio::task::spawn_blocking(move || compose(&document, &layout))
        .await
        .map_err(|e| AppError::Ebook(format!("ebook render task failed: {e}")))??;

    info!(%filename, chapters, bytes = bytes.len(), "Ebook generated");

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Ebook(format!("invalid attachment filename: {e}")))?,
    );

    Ok((headers, bytes).into_response())
}

/// Derives a header-safe `<title>.pdf` filename.
///
/// Each run of whitespace becomes one `_`; any other character outside
/// `[A-Za-z0-9._-]` becomes `_` too.
pub(crate) fn attachment_filename(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            stem.push(c);
        } else {
            stem.push('_');
        }
    }

    if stem.is_empty() {
        stem.push_str(FALLBACK_FILENAME);
    }
    format!("{stem}.pdf")
}
