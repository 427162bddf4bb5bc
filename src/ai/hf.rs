// src/ai/hf.rs

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{GeneratorError, ImageLabeler};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Label returned when the Space reply carries no prediction.
const FALLBACK_LABEL: &str = "plastic item";

/// Client for the Hugging Face Space that classifies recyclable items.
/// Wire format: `{"data": ["<base64>"]}` in, `{"data": ["<label>", ...]}` out.
pub struct HfSpaceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HfSpaceClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ImageLabeler for HfSpaceClient {
    async fn label(&self, image_base64: &str) -> Result<String, GeneratorError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "data": [image_base64] }))
            .send()
            .await?;

        let reply: serde_json::Value = response.json().await?;
        tracing::debug!("HF Space response: {}", reply);

        Ok(label_from_reply(&reply))
    }
}

/// Pulls `data[0]` out of the Space reply, falling back to a generic label
/// when the prediction is missing or not a string.
fn label_from_reply(reply: &serde_json::Value) -> String {
    reply
        .get("data")
        .and_then(|data| data.get(0))
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_the_first_prediction() {
        let reply = json!({ "data": ["glass jar", "0.93"] });
        assert_eq!(label_from_reply(&reply), "glass jar");
    }

    #[test]
    fn reply_without_data_falls_back_to_generic_label() {
        assert_eq!(label_from_reply(&json!({ "error": "boom" })), "plastic item");
        assert_eq!(label_from_reply(&json!({})), "plastic item");
    }

    #[test]
    fn non_string_prediction_falls_back_to_generic_label() {
        let reply = json!({ "data": [42] });
        assert_eq!(label_from_reply(&reply), "plastic item");
    }
}
