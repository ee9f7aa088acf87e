//! Gitmoji commit message generator library
//!
//! Collects the staged diff (or the last commit's), asks an OpenAI-compatible
//! chat-completion endpoint for a conventional commit message with a gitmoji
//! prefix, and hands the cleaned result back for printing or saving.
pub mod api;
pub mod config;
pub mod error;
pub mod git;
pub mod gitmoji;
pub mod hook;
pub mod normalization;
pub mod pipeline;
pub mod style;
pub mod templates;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigSource, Credentials, Settings, StaticSource, SystemSource};
pub use error::{CommitGenError, Result};
pub use gitmoji::{GitmojiTable, emoji_for_type};
pub use types::{Args, Outcome};
