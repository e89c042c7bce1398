use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One scene as returned by the language model, before illustration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDraft {
    pub description: String,
    /// Camera, lighting and movement suggestions.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub visuals: String,
    /// Free-form estimated duration, e.g. "0:00 - 0:15". Models sometimes answer
    /// with bare seconds, so numbers are accepted and kept as their decimal text.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub timestamp: String,
    /// Any additional fields the model chose to include; passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads any JSON scalar as text: strings as-is, numbers and booleans formatted,
/// `null` as empty. Arrays and objects are rejected.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "map" }),
            &"a string, number, boolean or null",
        )),
    }
}

/// A storyboard scene with its generated image, or `None` when generation failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    #[serde(flatten)]
    pub draft: SceneDraft,
    pub image: Option<String>,
}

impl Scene {
    pub fn new(mut draft: SceneDraft, image: Option<String>) -> Self {
        draft.extra.remove("image");
        Self { draft, image }
    }
}
