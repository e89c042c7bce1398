//! Storyboard illustration: one image request per scene, all in flight at once.
//!
//! Results are collected by scene index, so the output order never depends on which
//! request finishes first. A failed request degrades only its own scene (`image: None`).

use futures::future::join_all;
use tracing::{info, warn};

use crate::image_client::ImageGenerator;
use crate::storyboard::models::{Scene, SceneDraft};

/// Generates an image for every scene, using the scene description as the prompt.
pub async fn illustrate_scenes(drafts: Vec<SceneDraft>, images: &dyn ImageGenerator) -> Vec<Scene> {
    let requests = drafts.iter().enumerate().map(|(index, draft)| async move {
        match images.generate(&draft.description).await {
            Ok(image) => Some(image.to_src()),
            Err(e) => {
                warn!(
                    scene = index,
                    description = %draft.description,
                    "Image generation failed for scene: {e}"
                );
                None
            }
        }
    });
    let results = join_all(requests).await;

    let failed = results.iter().filter(|r| r.is_none()).count();
    info!(scenes = results.len(), failed, "Storyboard illustrated");

    drafts
        .into_iter()
        .zip(results)
        .map(|(draft, image)| Scene::new(draft, image))
        .collect()
}
