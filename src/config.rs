use std::{
   collections::HashMap,
   path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
   error::{CommitGenError, Result},
   style,
};

pub const API_KEY_VAR: &str = "AI_API_KEY";
pub const BASE_URL_VAR: &str = "AI_BASE_URL";
pub const MODEL_VAR: &str = "MODEL_NAME";
pub const TIMEOUT_VAR: &str = "AI_REQUEST_TIMEOUT";

pub const DEFAULT_MODEL: &str = "claude-3.5-sonnet@anthropic";
pub const CONFIG_FILE_NAME: &str = ".ai_config.json";
pub const GITMOJI_FILE_NAME: &str = "gitmojis.json";

/// Where everything process-wide comes from: environment, home and working
/// directory.
pub trait ConfigSource {
   /// Environment lookup. Empty values are treated as unset.
   fn var(&self, key: &str) -> Option<String>;

   fn working_dir(&self) -> PathBuf;

   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   fn home_dir(&self) -> Option<PathBuf> {
      self
         .var("HOME")
         .or_else(|| self.var("USERPROFILE"))
         .map(PathBuf::from)
   }

   /// Home config file. Always bound, even without a home directory, so error
   /// messages can point at it.
   fn config_path(&self) -> PathBuf {
      self
         .home_dir()
         .unwrap_or_else(|| PathBuf::from("~"))
         .join(CONFIG_FILE_NAME)
   }

   fn gitmoji_path(&self) -> PathBuf {
      self.working_dir().join(GITMOJI_FILE_NAME)
   }

   /// User prompt overrides (~/.commit-analyzer/prompts/)
   fn prompts_dir(&self) -> Option<PathBuf> {
      self
         .home_dir()
         .map(|home| home.join(".commit-analyzer").join("prompts"))
   }
}

/// The real process environment, with `<working_dir>/.env` loaded first.
#[derive(Debug, Clone)]
pub struct SystemSource {
   working_dir: PathBuf,
}

impl SystemSource {
   pub fn load(working_dir: impl Into<PathBuf>) -> Self {
      let working_dir = working_dir.into();
      let dotenv_path = working_dir.join(".env");
      if dotenv_path.is_file() {
         // Existing variables win over .env entries
         match dotenvy::from_path(&dotenv_path) {
            Ok(()) => tracing::debug!(path = %dotenv_path.display(), "loaded .env"),
            Err(e) => style::warn(&format!("Failed to load {}: {e}", dotenv_path.display())),
         }
      }
      Self { working_dir }
   }
}

impl ConfigSource for SystemSource {
   fn var(&self, key: &str) -> Option<String> {
      std::env::var(key).ok().filter(|v| !v.is_empty())
   }

   fn working_dir(&self) -> PathBuf {
      self.working_dir.clone()
   }
}

/// Fixed values instead of the process environment.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
   vars:        HashMap<String, String>,
   working_dir: PathBuf,
}

impl StaticSource {
   pub fn new(working_dir: impl Into<PathBuf>) -> Self {
      Self { vars: HashMap::new(), working_dir: working_dir.into() }
   }

   pub fn with_var(mut self, key: &str, value: &str) -> Self {
      self.vars.insert(key.to_string(), value.to_string());
      self
   }
}

impl ConfigSource for StaticSource {
   fn var(&self, key: &str) -> Option<String> {
      self.vars.get(key).filter(|v| !v.is_empty()).cloned()
   }

   fn working_dir(&self) -> PathBuf {
      self.working_dir.clone()
   }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
   pub api_key:  String,
   pub base_url: Option<String>,
}

/// Shape of `~/.ai_config.json`
#[derive(Debug, Default, Deserialize)]
struct HomeConfig {
   #[serde(default)]
   api_key:  Option<String>,
   #[serde(default)]
   base_url: Option<String>,
}

fn read_home_config(path: &Path) -> Result<HomeConfig> {
   let contents = std::fs::read_to_string(path)?;
   Ok(serde_json::from_str(&contents)?)
}

/// Resolve the API key and optional base URL.
///
/// Environment first (`AI_API_KEY`, `AI_BASE_URL`), then the home config file.
/// A `base_url` in the file only applies when the key came from the file too.
pub fn resolve_credentials(source: &dyn ConfigSource) -> Result<Credentials> {
   let mut api_key = source.var(API_KEY_VAR);
   let mut base_url = source.var(BASE_URL_VAR);
   let config_path = source.config_path();

   if api_key.is_none() && config_path.exists() {
      match read_home_config(&config_path) {
         Ok(file) => {
            api_key = file.api_key.filter(|k| !k.is_empty());
            if let Some(url) = file.base_url.filter(|u| !u.is_empty()) {
               base_url = Some(url);
            }
         },
         Err(e) => style::warn(&format!("Error reading config file: {e}")),
      }
   }

   let Some(api_key) = api_key else {
      return Err(CommitGenError::Config { config_path });
   };

   Ok(Credentials { api_key, base_url })
}

/// Everything the message generator needs for one run.
#[derive(Debug, Clone)]
pub struct Settings {
   pub credentials: Credentials,
   pub model:       String,

   /// HTTP request timeout in seconds
   pub request_timeout_secs: u64,

   /// HTTP connection timeout in seconds
   pub connect_timeout_secs: u64,

   /// Directory searched for a user `commit.md` prompt
   pub prompts_dir: Option<PathBuf>,
}

impl Settings {
   pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
   pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

   pub fn resolve(source: &dyn ConfigSource) -> Result<Self> {
      let credentials = resolve_credentials(source)?;
      let model = source
         .var(MODEL_VAR)
         .unwrap_or_else(|| DEFAULT_MODEL.to_string());

      let request_timeout_secs = match source.var(TIMEOUT_VAR) {
         Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
               style::warn(&format!(
                  "Ignoring invalid {TIMEOUT_VAR}={raw}, using {}s",
                  Self::DEFAULT_REQUEST_TIMEOUT_SECS
               ));
               Self::DEFAULT_REQUEST_TIMEOUT_SECS
            },
         },
         None => Self::DEFAULT_REQUEST_TIMEOUT_SECS,
      };

      Ok(Self {
         credentials,
         model,
         request_timeout_secs,
         connect_timeout_secs: Self::DEFAULT_CONNECT_TIMEOUT_SECS,
         prompts_dir: source.prompts_dir(),
      })
   }

   /// Apply a CLI model override
   pub fn with_model_override(mut self, model: Option<&str>) -> Self {
      if let Some(model) = model.filter(|m| !m.is_empty()) {
         self.model = model.to_string();
      }
      self
   }
}
