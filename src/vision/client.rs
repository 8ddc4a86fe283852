use axum::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::VisionConfig;

/// Instruction sent with every photo. The `Блюдо:` line must come first so the title
/// extractor can take the explicit marker path.
pub const ANALYSIS_PROMPT: &str = "Определи блюдо на фотографии и оцени его пищевую ценность для показанной порции. \
Первой строкой всегда пиши «Блюдо: <название>». \
Затем отдельными строками: «Калории: <число> ккал», «Белки: <число> г», «Жиры: <число> г», «Углеводы: <число> г». \
После этого можно добавить короткий комментарий.";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("vision request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("vision service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("vision response has no content")]
    EmptyResponse,
}

#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Returns the model's free-form nutrition estimate for one photo.
    async fn analyze(&self, image: &[u8], content_type: &str) -> Result<String, VisionError>;
}

/// Chat-completions endpoint (OpenAI-compatible proxy).
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn new(cfg: &VisionConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
        })
    }

    fn build_request(&self, image: &[u8], content_type: &str) -> ChatCompletionRequest {
        let data_url = format!(
            "data:{};base64,{}",
            content_type,
            BASE64_STANDARD.encode(image)
        );
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: vec![
                    MessageContent::Text {
                        text: ANALYSIS_PROMPT.into(),
                    },
                    MessageContent::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[async_trait]
impl VisionClient for ChatCompletionsClient {
    async fn analyze(&self, image: &[u8], content_type: &str) -> Result<String, VisionError> {
        let body = self.build_request(image, content_type);
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "vision request rejected");
            return Err(VisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let text = first_content(parsed)?;
        debug!(chars = text.chars().count(), "vision response received");
        Ok(text)
    }
}

fn first_content(resp: ChatCompletionResponse) -> Result<String, VisionError> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|s| !s.trim().is_empty())
        .ok_or(VisionError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<MessageContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MessageContent {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> VisionConfig {
        VisionConfig {
            endpoint: "http://localhost:9/v1/chat/completions".into(),
            api_key: None,
            model: "gpt-4o".into(),
            max_tokens: 800,
            timeout_secs: 5,
        }
    }

    #[test]
    fn request_carries_prompt_and_data_url() {
        let client = ChatCompletionsClient::new(&cfg()).unwrap();
        let req = client.build_request(b"abc", "image/png");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 800);
        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert!(content[0]["text"].as_str().unwrap().contains("Блюдо:"));
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,YWJj");
    }

    #[test]
    fn takes_first_choice_content() {
        let resp: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Блюдо: Плов"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(first_content(resp).unwrap(), "Блюдо: Плов");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let resp: ChatCompletionResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(first_content(resp), Err(VisionError::EmptyResponse)));

        let resp: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": null}}]
        }))
        .unwrap();
        assert!(matches!(first_content(resp), Err(VisionError::EmptyResponse)));
    }
}
