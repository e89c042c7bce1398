//! LLM and image prompt constants for storyboarding.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

// ────────────────────────────────────────────────────────────────────────────
// Script decomposition
// ────────────────────────────────────────────────────────────────────────────

pub const DECOMPOSE_INSTRUCTIONS: &str = "\
You are a helpful assistant that breaks down scripts into scenes for storyboarding.\n\
\n\
Instructions:\n\
\n\
- Read the user's script.\n\
- Break down the script into scenes.\n\
- For each scene, provide the following properties:\n\
  - \"description\": A detailed description of the scene.\n\
  - \"visuals\": Suggestions for camera angles, lighting, and movements.\n\
  - \"timestamp\": Estimated duration of the scene.\n\
\n\
The result must be an array of scenes, for example:\n\
\n\
[\n\
  {\n\
    \"description\": \"Scene description here.\",\n\
    \"visuals\": \"Visual suggestions here.\",\n\
    \"timestamp\": \"Start time - End time\"\n\
  }\n\
]\n";

pub const DECOMPOSE_PROMPT_TEMPLATE: &str = "Break down the following script into scenes:\n\n{script}";

/// Full system prompt for decomposition: scene schema followed by the JSON-only rule.
pub fn decompose_system() -> String {
    format!("{DECOMPOSE_INSTRUCTIONS}\n{JSON_ONLY_SYSTEM}")
}

pub fn build_decompose_prompt(script: &str) -> String {
    DECOMPOSE_PROMPT_TEMPLATE.replace("{script}", script)
}

// ────────────────────────────────────────────────────────────────────────────
// Per-scene illustration
// ────────────────────────────────────────────────────────────────────────────

pub const SCENE_IMAGE_PROMPT_TEMPLATE: &str = "\
**Scene {scene_number}:** {description}\n\
**Visuals:**\n\
- **Pixel Art Style:** (pixel art, pixelated:1.2), (masterpiece, best quality, extremely detailed:1.2)\n\
- **Shot Composition:** Use a {shot} to keep the scene visually dynamic.\n\
- **Environment:** {visuals}\n\
- **Children's Book Aesthetic:** Vibrant colors, magical elements and friendly characters; playful, with a sense of wonder.\n\
- **Lighting:** Bright, cheerful lighting that highlights the magic of the scene.\n\
- **Color Palette:** Warm, inviting tones suited to a pixel-art children's book.";

/// Shot angle for a 0-based scene index; rotates so consecutive scenes differ.
pub fn shot_for(index: usize) -> &'static str {
    match index % 3 {
        0 => "wide shot",
        1 => "close-up",
        _ => "over-the-shoulder",
    }
}

pub fn build_scene_image_prompt(description: &str, visuals: &str, index: usize) -> String {
    SCENE_IMAGE_PROMPT_TEMPLATE
        .replace("{scene_number}", &(index + 1).to_string())
        .replace("{shot}", shot_for(index))
        .replace("{visuals}", visuals)
        .replace("{description}", description)
}
