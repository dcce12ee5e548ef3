use async_trait::async_trait;

use crate::entities::error::ComparatorError;

pub mod gpt_request;
pub mod gpt_responses_handler;

pub use gpt_request::{GptRequestConfig, PdfAttachment};
pub use gpt_responses_handler::{GptClientConfig, GptResponsesClient};

/// Hosted model capability: one request in, the raw JSON text of the answer out.
#[async_trait]
pub trait LlmInvoker: Send + Sync {
    async fn invoke(&self, request: &GptRequestConfig) -> Result<String, ComparatorError>;
}
