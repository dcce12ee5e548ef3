use std::fmt;
use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeError;
use serde::{Serialize, Deserialize};

pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate comparison. Please check input names or try again.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract specifications from the PDF.";

#[derive(Serialize, Deserialize, Clone)]
pub struct ComparatorError {
    pub error_type: ErrorType,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    ValidationError,
    MissingCredentialError,
    ServiceError,
    EmptyResponseError,
    SchemaViolationError,
}

impl ComparatorError {
    pub fn new(error_type: ErrorType, message: String) -> ComparatorError {
        tracing::debug!(target: "comparison", "error created type={:?} message={}", error_type, message);
        ComparatorError { error_type, message }
    }

    pub fn validation(message: impl Into<String>) -> ComparatorError {
        ComparatorError::new(ErrorType::ValidationError, message.into())
    }

    pub fn missing_credential() -> ComparatorError {
        ComparatorError::new(ErrorType::MissingCredentialError, "API Key is missing.".to_string())
    }

    pub fn service(message: impl Into<String>) -> ComparatorError {
        ComparatorError::new(ErrorType::ServiceError, message.into())
    }

    pub fn empty_response() -> ComparatorError {
        ComparatorError::new(ErrorType::EmptyResponseError, "Empty response from AI".to_string())
    }

    pub fn schema_violation(message: impl Into<String>) -> ComparatorError {
        ComparatorError::new(ErrorType::SchemaViolationError, message.into())
    }

    /// The single message shown to the user when a submission fails.
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERATION_FAILED_MESSAGE)
    }

    /// Message shown when reading specs out of an uploaded PDF fails.
    pub fn extraction_user_message(&self) -> String {
        self.user_message_or(EXTRACTION_FAILED_MESSAGE)
    }

    fn user_message_or(&self, service_failure: &str) -> String {
        match self.error_type {
            ErrorType::ValidationError => self.message.clone(),
            ErrorType::MissingCredentialError => self.message.clone(),
            ErrorType::ServiceError
            | ErrorType::EmptyResponseError
            | ErrorType::SchemaViolationError => service_failure.to_string(),
        }
    }
}

impl fmt::Display for ComparatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl fmt::Debug for ComparatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.error_type, self.message)
    }
}

impl std::error::Error for ComparatorError {}

impl From<SerdeError> for ComparatorError {
    fn from(error: SerdeError) -> ComparatorError {
        ComparatorError::schema_violation(format!("serde error : {}", error))
    }
}

impl From<ReqwestError> for ComparatorError {
    fn from(error: ReqwestError) -> ComparatorError {
        ComparatorError::service(format!("Failed to send request to GPT: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_side_failures_share_one_user_message() {
        for error in [
            ComparatorError::service("GPT API error (500): boom"),
            ComparatorError::empty_response(),
            ComparatorError::schema_violation("missing field"),
        ] {
            assert_eq!(error.user_message(), GENERATION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn extraction_failures_have_their_own_message() {
        let error = ComparatorError::schema_violation("$.ramBrand: missing required property");
        assert_eq!(error.extraction_user_message(), EXTRACTION_FAILED_MESSAGE);
        assert_eq!(
            ComparatorError::validation("Please upload a PDF file.").extraction_user_message(),
            "Please upload a PDF file."
        );
    }

    #[test]
    fn credential_error_keeps_its_own_message() {
        let error = ComparatorError::missing_credential();
        assert_eq!(error.error_type, ErrorType::MissingCredentialError);
        assert_eq!(error.user_message(), "API Key is missing.");
    }

    #[test]
    fn serde_errors_become_schema_violations() {
        let error: ComparatorError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(error.error_type, ErrorType::SchemaViolationError);
    }
}
