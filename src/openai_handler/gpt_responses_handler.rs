use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::error::ComparatorError;
use crate::environment;
use crate::openai_handler::{GptRequestConfig, LlmInvoker};

#[derive(Debug, Clone)]
pub struct GptClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Option<Duration>,
}

impl GptClientConfig {
    pub fn from_env() -> GptClientConfig {
        GptClientConfig {
            api_key: environment::get_api_key(),
            base_url: environment::get_api_base_url(),
            model: environment::get_comparison_model(),
            max_output_tokens: environment::get_max_output_tokens(),
            temperature: 0.1,
            timeout: environment::get_timeout_seconds().map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Serialize)]
struct GPTRequest {
    model: String,
    input: Vec<GPTMessage>,
    max_output_tokens: u32,
    text: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GPTMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "input_text")]
    InputText { text: String },
    #[serde(rename = "input_file")]
    InputFile { filename: String, file_data: String },
}

#[derive(Debug, Deserialize)]
struct GPTResponse {
    output: Vec<ResponseOutputItem>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ResponseOutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

pub fn build_responses_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{}/responses", base)
    } else {
        format!("{}/v1/responses", base)
    }
}

fn system_prompt_with_metadata(system_prompt: &str) -> String {
    format!(
        "{}\n\nMetadata:\nDate of today: {}",
        system_prompt,
        Utc::now().format("%Y-%m-%d")
    )
}

fn build_request_body(config: &GptClientConfig, request: &GptRequestConfig) -> GPTRequest {
    let user_content = match &request.attachment {
        None => MessageContent::Text(request.user_prompt.clone()),
        Some(attachment) => MessageContent::Parts(vec![
            ContentPart::InputText {
                text: request.user_prompt.clone(),
            },
            ContentPart::InputFile {
                filename: attachment.filename.clone(),
                file_data: attachment.data_url(),
            },
        ]),
    };

    GPTRequest {
        model: config.model.clone(),
        input: vec![
            GPTMessage {
                role: "system".to_string(),
                content: MessageContent::Text(system_prompt_with_metadata(&request.system_prompt)),
            },
            GPTMessage {
                role: "user".to_string(),
                content: user_content,
            },
        ],
        max_output_tokens: config.max_output_tokens,
        temperature: config.temperature,
        text: serde_json::json!({
            "format": {
                "type": "json_schema",
                "name": request.schema_name,
                "schema": request.schema.to_json_schema(),
                "strict": true
            }
        }),
    }
}

/// Pulls the model's text out of a `/v1/responses` body, falling back to the
/// chat-completions shape that some compatible gateways return.
pub fn extract_output_text(status: StatusCode, body: &str) -> Result<String, ComparatorError> {
    if !status.is_success() {
        return Err(ComparatorError::service(format!("GPT API error ({}): {}", status, body)));
    }
    if body.trim().is_empty() {
        return Err(ComparatorError::empty_response());
    }

    if let Ok(gpt_resp) = serde_json::from_str::<GPTResponse>(body) {
        if gpt_resp.status != "completed" {
            return Err(ComparatorError::service(format!(
                "GPT response not completed, status={}",
                gpt_resp.status
            )));
        }
        let content = gpt_resp
            .output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter());
        for item in content {
            if let Some(refusal) = &item.refusal {
                return Err(ComparatorError::service(format!("GPT refused the request: {}", refusal)));
            }
            if item.kind == "output_text" && !item.text.trim().is_empty() {
                return Ok(item.text.clone());
            }
        }
        return Err(ComparatorError::empty_response());
    }

    if let Ok(chat_resp) = serde_json::from_str::<ChatCompletionsResponse>(body) {
        return chat_resp
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(ComparatorError::empty_response);
    }

    Err(ComparatorError::service(format!("Failed to parse GPT response body: {}", body)))
}

pub struct GptResponsesClient {
    client: Client,
    config: GptClientConfig,
    api_key: String,
}

impl GptResponsesClient {
    /// Fails with a missing credential error before anything touches the network.
    pub fn new(config: GptClientConfig) -> Result<GptResponsesClient, ComparatorError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(ComparatorError::missing_credential)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(GptResponsesClient { client, config, api_key })
    }

    pub fn from_env() -> Result<GptResponsesClient, ComparatorError> {
        GptResponsesClient::new(GptClientConfig::from_env())
    }
}

#[async_trait]
impl LlmInvoker for GptResponsesClient {
    async fn invoke(&self, request: &GptRequestConfig) -> Result<String, ComparatorError> {
        let request_url = build_responses_url(&self.config.base_url);
        let gpt_request = build_request_body(&self.config, request);

        info!(
            target: "comparison",
            "request_id: {} llm_call name={} model={} attachment={}",
            request.request_id,
            request.display_name(),
            self.config.model,
            request.attachment.is_some()
        );

        let resp = self
            .client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&gpt_request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let output = extract_output_text(status, &body);

        match &output {
            Ok(text) => info!(
                target: "comparison",
                "request_id: {} llm_result name={} status={} output_len={}",
                request.request_id,
                request.display_name(),
                status.as_u16(),
                text.len()
            ),
            Err(e) => tracing::warn!(
                target: "comparison",
                "request_id: {} llm_failed name={} status={} error={}",
                request.request_id,
                request.display_name(),
                status.as_u16(),
                e
            ),
        }
        output
    }
}
