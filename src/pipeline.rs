//! One run: diff, generate, print, and optionally save.

use crate::{
   api,
   config::{ConfigSource, Settings},
   git::{self, Diff},
   gitmoji::GitmojiTable,
   normalization::ensure_gitmoji,
   style,
   types::{Args, Outcome},
};

pub const NO_CHANGES_MESSAGE: &str = "No changes to analyze";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate commit message";

/// Width of the dashed frame around the printed message
const FRAME_WIDTH: usize = 24;

/// Resolve settings and ask the model for a message. Every failure is
/// reported on stderr and turns into `None`.
pub fn generate(diff: &Diff, source: &dyn ConfigSource, model: Option<&str>) -> Option<String> {
   let settings = match Settings::resolve(source) {
      Ok(settings) => settings.with_model_override(model),
      Err(e) => {
         style::print_error(&format!("Error generating commit message: {e}"));
         return None;
      },
   };
   let gitmojis = GitmojiTable::load_or_empty(&source.gitmoji_path());

   let label = format!("Generating commit message with {}...", style::model(&settings.model));
   match style::with_spinner_result(&label, || api::generate_commit_message(&diff.text, &settings)) {
      Ok(message) => Some(ensure_gitmoji(&message, &gitmojis)),
      Err(e) => {
         style::print_error(&format!("Error generating commit message: {e}"));
         None
      },
   }
}

fn print_message(message: &str) {
   println!();
   println!("{}", style::bold("Generated commit message:"));
   println!("{}", style::rule(FRAME_WIDTH));
   println!("{message}");
   println!("{}", style::rule(FRAME_WIDTH));
}

/// Run the whole pipeline once and report where it stopped.
pub fn run(args: &Args, source: &dyn ConfigSource) -> Outcome {
   let Some(diff) = git::extract_diff(&args.dir) else {
      println!("{NO_CHANGES_MESSAGE}");
      return Outcome::NoDiff;
   };
   style::print_info(&format!("Analyzing {}", diff.source.as_str()));

   let Some(message) = generate(&diff, source, args.model.as_deref()) else {
      println!("{GENERATION_FAILED_MESSAGE}");
      return Outcome::Failed;
   };

   print_message(&message);

   let Some(target) = &args.hook else {
      return Outcome::Printed;
   };
   let path = target
      .clone()
      .unwrap_or_else(|| git::commit_editmsg_path(&args.dir));

   match git::write_commit_message(&path, &message) {
      Ok(()) => {
         println!(
            "{} {}",
            style::success(style::icons::SAVE),
            style::dim(&format!("Saved to {}", path.display()))
         );
         Outcome::PrintedAndSaved
      },
      Err(e) => {
         style::print_error(&format!("Failed to save commit message to {}: {e}", path.display()));
         Outcome::Failed
      },
   }
}
