use std::path::Path;

use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::{
   error::{CommitGenError, Result},
   gitmoji::{COMMIT_KINDS, CommitKind},
};

/// Embedded prompts folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "prompts/"]
struct Prompts;

pub const COMMIT_PROMPT: &str = "commit.md";

/// Summary line description limit stated in the prompt
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// Body wrap column stated in the prompt
pub const BODY_WRAP_COLUMN: usize = 72;

/// Load a prompt template, preferring a user file in `prompts_dir`.
fn load_template(name: &str, prompts_dir: Option<&Path>) -> Result<String> {
   if let Some(template_path) = prompts_dir.map(|dir| dir.join(name))
      && template_path.is_file()
   {
      tracing::debug!(path = %template_path.display(), "using user prompt template");
      return std::fs::read_to_string(&template_path).map_err(|e| {
         CommitGenError::Template(format!(
            "Failed to read template file {}: {e}",
            template_path.display()
         ))
      });
   }

   let embedded = Prompts::get(name)
      .ok_or_else(|| CommitGenError::Template(format!("Embedded template {name} not found")))?;
   String::from_utf8(embedded.data.into_owned()).map_err(|e| {
      CommitGenError::Template(format!("Embedded template {name} is not valid UTF-8: {e}"))
   })
}

/// Render the commit message prompt with `diff` embedded verbatim.
pub fn render_commit_prompt(diff: &str, prompts_dir: Option<&Path>) -> Result<String> {
   let template = load_template(COMMIT_PROMPT, prompts_dir)?;

   let (core, extra): (Vec<&CommitKind>, Vec<&CommitKind>) =
      COMMIT_KINDS.iter().partition(|kind| kind.core);

   let mut context = Context::new();
   context.insert("core_kinds", &core);
   context.insert("extra_kinds", &extra);
   context.insert("max_description", &MAX_DESCRIPTION_CHARS);
   context.insert("body_wrap", &BODY_WRAP_COLUMN);
   context.insert("diff", diff);

   // Prompts are plain text, never HTML-escaped
   Ok(Tera::one_off(&template, &context, false)?)
}
