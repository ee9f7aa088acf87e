use std::{
   io::Write,
   path::{Path, PathBuf},
   process::Command,
};

use crate::error::{CommitGenError, Result};

/// Which git query produced a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSource {
   /// `git diff --cached`
   Staged,
   /// `git diff HEAD~1`, used when nothing is staged
   LastCommit,
}

impl DiffSource {
   const fn args(self) -> &'static [&'static str] {
      match self {
         Self::Staged => &["diff", "--cached"],
         Self::LastCommit => &["diff", "HEAD~1"],
      }
   }

   pub const fn as_str(self) -> &'static str {
      match self {
         Self::Staged => "staged changes",
         Self::LastCommit => "last commit",
      }
   }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
   pub source: DiffSource,
   pub text:   String,
}

/// Run git with `args` in `dir` and return stdout, failing on non-zero exit
fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
   tracing::debug!(dir = %dir.display(), "git {}", args.join(" "));
   let output = Command::new("git")
      .args(args)
      .current_dir(dir)
      .output()
      .map_err(|e| CommitGenError::GitError(format!("Failed to run git {}: {e}", args.join(" "))))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(CommitGenError::GitError(format!(
         "git {} exited with {}: {}",
         args.join(" "),
         output.status,
         stderr.trim()
      )));
   }

   Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Staged diff, or the last commit's diff when nothing is staged.
pub fn get_diff(dir: &Path) -> Result<Diff> {
   for source in [DiffSource::Staged, DiffSource::LastCommit] {
      let text = run_git(dir, source.args())?;
      if !text.trim().is_empty() {
         tracing::debug!(source = source.as_str(), bytes = text.len(), "collected diff");
         return Ok(Diff { source, text });
      }
   }
   Err(CommitGenError::NoChanges)
}

/// Like [`get_diff`], but reports failures on stderr and returns `None`.
pub fn extract_diff(dir: &Path) -> Option<Diff> {
   match get_diff(dir) {
      Ok(diff) => Some(diff),
      Err(CommitGenError::NoChanges) => None,
      Err(e) => {
         eprintln!("Error getting git diff: {e}");
         None
      },
   }
}

/// Resolve a path inside the git directory (handles worktrees and
/// `core.hooksPath`), relative to `dir`.
pub fn git_path(dir: &Path, name: &str) -> Result<PathBuf> {
   let out = run_git(dir, &["rev-parse", "--git-path", name])?;
   let resolved = PathBuf::from(out.trim());
   if resolved.as_os_str().is_empty() {
      return Err(CommitGenError::GitError(format!("git rev-parse returned no path for {name}")));
   }
   Ok(if resolved.is_absolute() { resolved } else { dir.join(resolved) })
}

/// Location of the commit message edit file
pub fn commit_editmsg_path(dir: &Path) -> PathBuf {
   git_path(dir, "COMMIT_EDITMSG").unwrap_or_else(|e| {
      tracing::debug!("falling back to .git/COMMIT_EDITMSG: {e}");
      dir.join(".git").join("COMMIT_EDITMSG")
   })
}

/// Write `message` verbatim (UTF-8, no trailing newline) to `path`.
///
/// The content goes to a temporary file next to `path` first and is renamed
/// into place, so the target never holds a partial message.
pub fn write_commit_message(path: &Path, message: &str) -> Result<()> {
   let parent = path
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .unwrap_or_else(|| Path::new("."));
   let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
   tmp.write_all(message.as_bytes())?;
   tmp.flush()?;
   tmp.persist(path).map_err(|e| CommitGenError::IoError(e.error))?;
   tracing::debug!(path = %path.display(), bytes = message.len(), "wrote commit message");
   Ok(())
}
