extern crate dotenv;

use dotenv::dotenv;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_COMPARISON_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8000;

/// Returns `None` when the key is unset or blank; callers turn that into a
/// missing credential error.
pub fn get_api_key() -> Option<String> {
    dotenv().ok();
    std::env::var("API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

pub fn get_api_base_url() -> String {
    dotenv().ok();
    std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

pub fn get_comparison_model() -> String {
    dotenv().ok();
    std::env::var("COMPARISON_MODEL").unwrap_or_else(|_| DEFAULT_COMPARISON_MODEL.to_string())
}

pub fn get_max_output_tokens() -> u32 {
    dotenv().ok();
    std::env::var("LLM_MAX_OUTPUT_TOKENS")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
}

pub fn get_timeout_seconds() -> Option<u64> {
    dotenv().ok();
    std::env::var("LLM_TIMEOUT_SECONDS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
}
