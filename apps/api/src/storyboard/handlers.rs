//! Axum route handlers for the Storyboard API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::state::AppState;
use crate::storyboard::decompose::decompose_script;
use crate::storyboard::illustrate::illustrate_scenes;
use crate::storyboard::models::Scene;
use crate::storyboard::prompts::build_scene_image_prompt;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StoryboardRequest {
    pub script: String,
}

#[derive(Debug, Serialize)]
pub struct StoryboardResponse {
    pub storyboard: Vec<Scene>,
}

/// Either a scene to illustrate with the styled prompt, or a raw prompt.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageRequest {
    Scene {
        #[serde(rename = "sceneDescription")]
        scene_description: String,
        #[serde(rename = "sceneVisuals", default)]
        scene_visuals: String,
        #[serde(rename = "sceneIndex", default)]
        scene_index: usize,
    },
    Prompt {
        prompt: String,
    },
}

impl ImageRequest {
    /// The prompt actually sent to the image backend.
    pub fn prompt(&self) -> String {
        match self {
            ImageRequest::Scene {
                scene_description,
                scene_visuals,
                scene_index,
            } => build_scene_image_prompt(scene_description, scene_visuals, *scene_index),
            ImageRequest::Prompt { prompt } => prompt.clone(),
        }
    }

    fn subject(&self) -> &str {
        match self {
            ImageRequest::Scene {
                scene_description, ..
            } => scene_description,
            ImageRequest::Prompt { prompt } => prompt,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-storyboard
///
/// Script → scenes (language model) → one image per scene, generated concurrently.
/// A scene whose image fails keeps `image: null`; the storyboard is still returned.
pub async fn handle_generate_storyboard(
    State(state): State<AppState>,
    AppJson(request): AppJson<StoryboardRequest>,
) -> Result<Json<StoryboardResponse>, AppError> {
    if request.script.trim().is_empty() {
        return Err(AppError::Validation("script cannot be empty".to_string()));
    }

    let drafts = decompose_script(&request.script, state.llm.as_ref()).await?;
    let storyboard = illustrate_scenes(drafts, state.images.as_ref()).await;

    Ok(Json(StoryboardResponse { storyboard }))
}

/// POST /generate-image
///
/// Generates a single image. Scene requests get the styled per-scene prompt; plain
/// prompt requests are forwarded as-is.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    AppJson(request): AppJson<ImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    if request.subject().trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let image = state
        .images
        .generate(&request.prompt())
        .await
        .map_err(|e| AppError::ImageGeneration(e.to_string()))?;

    info!(
        scene = matches!(request, ImageRequest::Scene { .. }),
        "Image generated"
    );

    Ok(Json(ImageResponse {
        image: image.to_src(),
    }))
}
