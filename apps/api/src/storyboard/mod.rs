// Storyboarding: script → scenes via the language model, then one image per scene.
// Scene images are generated concurrently and collected back in scene order.

pub mod decompose;
pub mod handlers;
pub mod illustrate;
pub mod models;
pub mod prompts;
