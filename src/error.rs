use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitGenError {
   #[error(
      "No API key found. Please either:\n1. Create a .env file in your repository with \
       AI_API_KEY=your-api-key\n2. Set AI_API_KEY environment variable, or\n3. Create {} with \
       content: {{\"api_key\": \"your-api-key\"}}",
      .config_path.display()
   )]
   Config { config_path: PathBuf },

   #[error("Git command failed: {0}")]
   GitError(String),

   #[error("No staged changes and no previous commit to diff against")]
   NoChanges,

   #[error("API request failed (HTTP {status}): {body}")]
   ApiError { status: u16, body: String },

   #[error("API returned an empty completion")]
   EmptyResponse,

   #[error("Template error: {0}")]
   Template(String),

   #[error("A prepare-commit-msg hook already exists at {} (use --force to replace it)", .path.display())]
   HookExists { path: PathBuf },

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("HTTP error: {0}")]
   HttpError(#[from] reqwest::Error),
}

impl From<tera::Error> for CommitGenError {
   fn from(err: tera::Error) -> Self {
      use std::error::Error as _;

      // Tera keeps the useful part (missing variable, syntax error) in the source chain
      let mut message = err.to_string();
      let mut source = err.source();
      while let Some(cause) = source {
         message.push_str(": ");
         message.push_str(&cause.to_string());
         source = cause.source();
      }
      Self::Template(message)
   }
}

pub type Result<T> = std::result::Result<T, CommitGenError>;
