use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
   config::Settings,
   error::{CommitGenError, Result},
   normalization::clean_reply,
   templates,
};

/// Used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Build HTTP client with timeouts from settings
fn build_client(settings: &Settings) -> Result<reqwest::blocking::Client> {
   Ok(reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(settings.request_timeout_secs))
      .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
      .build()?)
}

/// `{base}/chat/completions`, tolerating a trailing slash on the base
pub fn completions_url(base_url: Option<&str>) -> String {
   let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
   format!("{base}/chat/completions")
}

#[derive(Debug, Serialize)]
struct Message {
   role:    String,
   content: String,
}

#[derive(Debug, Serialize)]
struct ApiRequest {
   model:    String,
   messages: Vec<Message>,
   stream:   bool,
}

#[derive(Debug, Deserialize)]
struct Choice {
   message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
   #[serde(default)]
   content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
   #[serde(default)]
   choices: Vec<Choice>,
}

/// Send one prompt and return the raw completion text.
pub fn complete(prompt: &str, settings: &Settings) -> Result<String> {
   let client = build_client(settings)?;
   let url = completions_url(settings.credentials.base_url.as_deref());
   tracing::debug!(%url, model = %settings.model, prompt_chars = prompt.len(), "sending completion request");

   let request = ApiRequest {
      model:    settings.model.clone(),
      messages: vec![Message { role: "user".to_string(), content: prompt.to_string() }],
      stream:   false,
   };

   let response = client
      .post(&url)
      .header("content-type", "application/json")
      .bearer_auth(&settings.credentials.api_key)
      .json(&request)
      .send()?;

   let status = response.status();
   if !status.is_success() {
      let error_text = response
         .text()
         .unwrap_or_else(|_| "Unknown error".to_string());
      return Err(CommitGenError::ApiError { status: status.as_u16(), body: error_text });
   }

   let api_response: ApiResponse = response.json()?;
   let content = api_response
      .choices
      .into_iter()
      .next()
      .and_then(|choice| choice.message.content)
      .filter(|content| !content.trim().is_empty())
      .ok_or(CommitGenError::EmptyResponse)?;

   tracing::debug!(reply_chars = content.len(), "received completion");
   Ok(content)
}

/// Render the prompt for `diff`, ask the model, and clean the reply.
pub fn generate_commit_message(diff: &str, settings: &Settings) -> Result<String> {
   let prompt = templates::render_commit_prompt(diff, settings.prompts_dir.as_deref())?;
   let raw = complete(&prompt, settings)?;
   let message = clean_reply(&raw);
   if message.is_empty() {
      return Err(CommitGenError::EmptyResponse);
   }
   Ok(message)
}
