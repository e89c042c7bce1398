//! Script decomposition: asks the language model for a JSON scene list and screens the answer.
//!
//! The model is told to answer with a bare JSON array. Its answer is checked in three
//! steps, each failing with the raw text attached so the client can show what came back:
//! 1. after trimming and fence stripping it must start with `[` or `{`
//! 2. it must parse as JSON
//! 3. it must be an array of objects with at least a string `description`

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LanguageModel};
use crate::storyboard::models::SceneDraft;
use crate::storyboard::prompts::{build_decompose_prompt, decompose_system};

/// Breaks a script into ordered scenes using the language model.
pub async fn decompose_script(
    script: &str,
    llm: &dyn LanguageModel,
) -> Result<Vec<SceneDraft>, AppError> {
    let prompt = build_decompose_prompt(script);
    let completion = llm
        .complete(&prompt, &decompose_system())
        .await
        .map_err(|e| AppError::Llm(format!("Scene decomposition failed: {e}")))?;

    debug!(assistant_response = %completion, "Decomposition response received");

    let scenes = parse_scenes(&completion)?;
    info!(scenes = scenes.len(), "Script decomposed");
    Ok(scenes)
}

/// Screens raw model output into scene drafts.
pub(crate) fn parse_scenes(completion: &str) -> Result<Vec<SceneDraft>, AppError> {
    let rejected = |message: &str| AppError::AssistantOutput {
        message: message.to_string(),
        assistant_response: completion.to_string(),
    };

    let text = strip_json_fences(completion);
    if !text.starts_with('[') && !text.starts_with('{') {
        return Err(rejected("Assistant did not return JSON"));
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|_| rejected("Invalid JSON response from assistant"))?;

    if !value.is_array() {
        return Err(rejected("Assistant returned an unexpected scene shape"));
    }

    serde_json::from_value(value).map_err(|e| {
        rejected(&format!("Assistant returned an unexpected scene shape: {e}"))
    })
}
