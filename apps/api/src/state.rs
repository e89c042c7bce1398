use std::sync::Arc;

use crate::ebook::LayoutConfig;
use crate::image_client::ImageGenerator;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scene decomposition backend. Default: `LlmClient`.
    pub llm: Arc<dyn LanguageModel>,
    /// Image backend shared by the storyboard fan-out and `/generate-image`.
    pub images: Arc<dyn ImageGenerator>,
    /// Page geometry for ebook export: Times-Roman 12pt on A4, 50pt margins.
    pub layout: LayoutConfig,
}

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::image_client::{ImageError, ImageRef};
    use crate::llm_client::LlmError;

    /// Language model that always answers with the same text, or fails when `reply` is `None`.
    pub struct ScriptedModel {
        pub reply: Option<String>,
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(LlmError::Api {
                    status: 503,
                    message: "model overloaded".to_string(),
                }),
            }
        }
    }

    /// Image backend that echoes the prompt into a URL and fails on prompts containing `fail_on`.
    pub struct EchoImages {
        pub fail_on: Option<String>,
    }

    #[async_trait]
    impl ImageGenerator for EchoImages {
        async fn generate(&self, prompt: &str) -> Result<ImageRef, ImageError> {
            if let Some(marker) = &self.fail_on {
                if prompt.contains(marker.as_str()) {
                    return Err(ImageError::NoImage);
                }
            }
            Ok(ImageRef::Url(format!(
                "https://img.test/{}",
                prompt.split_whitespace().collect::<Vec<_>>().join("-")
            )))
        }
    }

    pub fn state_with(reply: Option<&str>, fail_on: Option<&str>) -> AppState {
        AppState {
            llm: Arc::new(ScriptedModel {
                reply: reply.map(str::to_string),
            }),
            images: Arc::new(EchoImages {
                fail_on: fail_on.map(str::to_string),
            }),
            layout: LayoutConfig::default(),
        }
    }

    pub fn test_state() -> AppState {
        state_with(Some("[]"), None)
    }
}
