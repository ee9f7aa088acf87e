use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
   name = "commit-analyzer",
   version,
   about = "Generate a gitmoji conventional commit message for staged changes"
)]
pub struct Args {
   /// Also write the message to the commit message file. Git passes that
   /// file to prepare-commit-msg hooks; defaults to COMMIT_EDITMSG.
   #[arg(long, value_name = "FILE", num_args = 0..=1)]
   pub hook: Option<Option<PathBuf>>,

   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: PathBuf,

   /// Model to request (overrides MODEL_NAME)
   #[arg(long, short = 'm')]
   pub model: Option<String>,

   /// Verbose diagnostics on stderr
   #[arg(long)]
   pub debug: bool,

   /// Install a prepare-commit-msg hook that runs this tool in hook mode
   #[arg(long, conflicts_with = "hook")]
   pub install_hook: bool,

   /// Replace an existing prepare-commit-msg hook
   #[arg(long, requires = "install_hook")]
   pub force: bool,
}

impl Default for Args {
   fn default() -> Self {
      Self {
         hook:         None,
         dir:          PathBuf::from("."),
         model:        None,
         debug:        false,
         install_hook: false,
         force:        false,
      }
   }
}

/// Terminal state of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
   /// Neither staged changes nor a previous commit to describe
   NoDiff,
   /// Configuration, API, or hook-file failure
   Failed,
   Printed,
   /// Printed and written to the commit message file (hook mode)
   PrintedAndSaved,
}

impl Outcome {
   pub const fn exit_code(self) -> u8 {
      match self {
         Self::NoDiff | Self::Failed => 1,
         Self::Printed | Self::PrintedAndSaved => 0,
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_no_flags() {
      let args = Args::try_parse_from(["commit-analyzer"]).unwrap();
      assert!(args.hook.is_none());
      assert_eq!(args.dir, PathBuf::from("."));
      assert!(!args.install_hook);
   }

   #[test]
   fn test_hook_flag_without_file() {
      let args = Args::try_parse_from(["commit-analyzer", "--hook"]).unwrap();
      assert_eq!(args.hook, Some(None));
   }

   #[test]
   fn test_hook_flag_with_file() {
      let args =
         Args::try_parse_from(["commit-analyzer", "--hook", ".git/COMMIT_EDITMSG"]).unwrap();
      assert_eq!(args.hook, Some(Some(PathBuf::from(".git/COMMIT_EDITMSG"))));
   }

   #[test]
   fn test_install_hook_conflicts_with_hook() {
      assert!(Args::try_parse_from(["commit-analyzer", "--hook", "--install-hook"]).is_err());
   }

   #[test]
   fn test_force_requires_install_hook() {
      assert!(Args::try_parse_from(["commit-analyzer", "--force"]).is_err());
      let args = Args::try_parse_from(["commit-analyzer", "--install-hook", "--force"]).unwrap();
      assert!(args.install_hook && args.force);
   }

   #[test]
   fn test_exit_codes() {
      assert_eq!(Outcome::NoDiff.exit_code(), 1);
      assert_eq!(Outcome::Failed.exit_code(), 1);
      assert_eq!(Outcome::Printed.exit_code(), 0);
      assert_eq!(Outcome::PrintedAndSaved.exit_code(), 0);
   }
}
