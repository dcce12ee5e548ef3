use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::comparison::schema::{describe_violations, SchemaDescriptor};
use crate::entities::error::ComparatorError;
use crate::openai_handler::LlmInvoker;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment {
    pub filename: String,
    pub base64_data: String,
}

impl PdfAttachment {
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> PdfAttachment {
        PdfAttachment {
            filename: filename.into(),
            base64_data: STANDARD.encode(bytes),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:application/pdf;base64,{}", self.base64_data)
    }
}

/// One structured-output call: prompts, the expected answer shape and an
/// optional document.
#[derive(Debug, Clone)]
pub struct GptRequestConfig {
    pub request_id: Uuid,
    pub display_name: Option<String>,
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema_name: String,
    pub schema: SchemaDescriptor,
    pub attachment: Option<PdfAttachment>,
}

impl GptRequestConfig {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        schema_name: impl Into<String>,
        schema: SchemaDescriptor,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            display_name: None,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            schema_name: schema_name.into(),
            schema,
            attachment: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_attachment(mut self, attachment: PdfAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("unknown")
    }

    /// Single attempt: invoke, then check the answer against the schema before
    /// deserializing it.
    pub async fn execute<T>(&self, invoker: &dyn LlmInvoker) -> Result<T, ComparatorError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let raw_text = invoker.invoke(self).await?;
        parse_structured_output(&raw_text, &self.schema)
    }
}

/// Keeps the outermost `{...}` so stray fences or prose around the JSON do not
/// break parsing.
pub fn extract_json_text(text: &str) -> &str {
    let trimmed_text = text.trim();
    match (trimmed_text.find('{'), trimmed_text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed_text[start..=end],
        _ => trimmed_text,
    }
}

pub fn parse_structured_output<T>(raw_text: &str, schema: &SchemaDescriptor) -> Result<T, ComparatorError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    if raw_text.trim().is_empty() {
        return Err(ComparatorError::empty_response());
    }
    let json_text = extract_json_text(raw_text);
    let value: serde_json::Value = serde_json::from_str(json_text).map_err(|e| {
        ComparatorError::schema_violation(format!("Failed to parse GPT JSON response: {}", e))
    })?;
    schema.validate(&value).map_err(|violations| {
        ComparatorError::schema_violation(format!(
            "GPT response does not match the schema: {}",
            describe_violations(&violations)
        ))
    })?;
    serde_json::from_value(value).map_err(|e| {
        ComparatorError::schema_violation(format!("Failed to deserialize JSON into target type: {}", e))
    })
}
