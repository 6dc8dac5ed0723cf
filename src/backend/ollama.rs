//! Backend for Ollama's native `/api/generate` endpoint.

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::{ContentError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Non-streaming backend for a local or remote Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaBackend;

impl OllamaBackend {
    /// Build the Ollama `options` object from the LlmConfig.
    fn build_options(request: &LlmRequest) -> Value {
        let mut opts = json!({
            "temperature": request.config.temperature,
            "num_predict": request.config.max_tokens,
        });
        if let Some(ref custom) = request.config.options {
            if let (Some(base), Some(extra)) = (opts.as_object_mut(), custom.as_object()) {
                for (k, v) in extra {
                    base.insert(k.clone(), v.clone());
                }
            }
        }
        opts
    }

    fn build_generate_body(request: &LlmRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": Self::build_options(request),
        });
        if request.config.json_mode {
            body["format"] = json!("json");
        }
        body
    }

    /// Parse a Retry-After header value as integer seconds.
    fn parse_retry_after(value: &str) -> Option<Duration> {
        value.trim().parse::<u64>().ok().map(Duration::from_secs)
    }

    fn extract_metadata(json_resp: &Value) -> Option<Value> {
        let meta: serde_json::Map<String, Value> = [
            "total_duration",
            "eval_count",
            "eval_duration",
            "prompt_eval_count",
            "model",
        ]
        .iter()
        .filter_map(|key| json_resp.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();
        (!meta.is_empty()).then_some(Value::Object(meta))
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));
        let body = Self::build_generate_body(request);
        debug!("POST {url} model={}", request.model);

        let resp = client.post(&url).json(&body).send().await?;
        let status = resp.status().as_u16();

        if !resp.status().is_success() {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(Self::parse_retry_after);
            let text = resp.text().await.unwrap_or_default();
            return Err(ContentError::HttpError {
                status,
                body: text,
                retry_after,
            });
        }

        let json_resp: Value = resp.json().await?;
        let text = json_resp
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        Ok(LlmResponse {
            text,
            status,
            metadata: Self::extract_metadata(&json_resp),
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmConfig;

    fn test_request() -> LlmRequest {
        LlmRequest {
            model: "llama3.2".into(),
            prompt: "List 3 destinations".into(),
            config: LlmConfig::default(),
        }
    }

    #[test]
    fn test_generate_payload() {
        let body = OllamaBackend::build_generate_body(&test_request());
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["prompt"], "List 3 destinations");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["temperature"], 0.7);
        assert_eq!(body["options"]["num_predict"], 2048);
        assert!(body.get("format").is_none());
    }

    #[test]
    fn test_json_mode() {
        let mut request = test_request();
        request.config.json_mode = true;
        assert_eq!(OllamaBackend::build_generate_body(&request)["format"], "json");
    }

    #[test]
    fn test_custom_options() {
        let mut request = test_request();
        request.config.options = Some(json!({"top_p": 0.9, "seed": 42}));
        let body = OllamaBackend::build_generate_body(&request);
        assert_eq!(body["options"]["top_p"], 0.9);
        assert_eq!(body["options"]["seed"], 42);
        assert_eq!(body["options"]["temperature"], 0.7);
    }

    #[test]
    fn test_retry_after_seconds() {
        assert_eq!(OllamaBackend::parse_retry_after(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(OllamaBackend::parse_retry_after("Wed, 21 Oct 2015"), None);
    }

    #[test]
    fn test_metadata_extraction() {
        let meta = OllamaBackend::extract_metadata(&json!({"eval_count": 12, "response": "x"}));
        assert_eq!(meta, Some(json!({"eval_count": 12})));
        assert_eq!(OllamaBackend::extract_metadata(&json!({"response": "x"})), None);
    }
}
