use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of the POST to the generation endpoint. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPayload {
    pub video_description: String,
    pub negative_prompt: String,
    pub style_preset: String,
    pub aspect_ratio: String,
    pub output_format: String,
    pub seed: i64,
}

impl GenerationPayload {
    /// The one payload this program sends.
    pub fn fixed() -> Self {
        Self {
            video_description: "son wokong".to_string(),
            negative_prompt: "blurry, low quality, distorted faces, poor lighting".to_string(),
            style_preset: "neon-punk".to_string(),
            aspect_ratio: "16:9".to_string(),
            output_format: "png".to_string(),
            seed: 0,
        }
    }
}

impl Default for GenerationPayload {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Successful generation response. Only `image_url` is relied upon.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    #[serde(default, deserialize_with = "string_or_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// `null`, numbers and objects all count as "no usable URL".
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(url) => Ok(Some(url)),
        _ => Ok(None),
    }
}

/// Best-effort read of a failure body, used for diagnostics only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<Value>,
    pub error: Option<Value>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<ApiErrorBody>(body).ok()
    }

    pub fn summary(&self) -> Option<String> {
        self.detail
            .as_ref()
            .or(self.error.as_ref())
            .map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .or_else(|| self.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_payload_wire_format() {
        let encoded = serde_json::to_string(&GenerationPayload::fixed()).unwrap();
        assert_eq!(
            encoded,
            r#"{"video_description":"son wokong","negative_prompt":"blurry, low quality, distorted faces, poor lighting","style_preset":"neon-punk","aspect_ratio":"16:9","output_format":"png","seed":0}"#
        );
    }

    #[test]
    fn test_fixed_payload_is_deterministic() {
        assert_eq!(GenerationPayload::fixed(), GenerationPayload::default());
    }

    #[test]
    fn test_response_reads_image_url_and_keeps_extras() {
        let response: GenerationResponse = serde_json::from_value(json!({
            "image_url": "http://x/y.png",
            "seed": 7
        }))
        .unwrap();
        assert_eq!(response.image_url.as_deref(), Some("http://x/y.png"));
        assert_eq!(response.extra.get("seed"), Some(&json!(7)));
    }

    #[test]
    fn test_response_without_usable_image_url() {
        for body in [json!({}), json!({"image_url": null}), json!({"image_url": 3})] {
            let response: GenerationResponse = serde_json::from_value(body).unwrap();
            assert!(response.image_url.is_none());
        }
    }

    #[test]
    fn test_error_body_summary() {
        let body = ApiErrorBody::parse(r#"{"detail": "rate limited"}"#).unwrap();
        assert_eq!(body.summary().as_deref(), Some("rate limited"));

        let body = ApiErrorBody::parse(r#"{"detail": [{"loc": ["body"]}]}"#).unwrap();
        assert_eq!(body.summary().as_deref(), Some(r#"[{"loc":["body"]}]"#));

        assert!(ApiErrorBody::parse("not found").is_none());
    }
}
