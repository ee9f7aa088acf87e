//! Installs the `prepare-commit-msg` hook that runs hook mode.

use std::path::{Path, PathBuf};

use crate::{
   error::{CommitGenError, Result},
   git,
};

/// Second line of every script we write; identifies hooks we own
pub const HOOK_MARKER: &str = "# commit-analyzer prepare-commit-msg hook";

/// Quote for a POSIX shell single-quoted string
fn shell_quote(s: &str) -> String {
   format!("'{}'", s.replace('\'', r"'\''"))
}

/// Hook script invoking `binary`. Git passes the message file as `$1` and the
/// message source as `$2`; explicit messages, merges, squashes and amends are
/// left alone. A failed generation never blocks the commit.
pub fn hook_script(binary: &str) -> String {
   format!(
      r#"#!/bin/sh
{HOOK_MARKER}
case "$2" in
   message|merge|squash|commit) exit 0 ;;
esac
{bin} --hook "$1" || echo "commit-analyzer: no message generated" >&2
exit 0
"#,
      bin = shell_quote(binary)
   )
}

/// Write the hook into the repository at `dir` and return its path.
///
/// A hook that was not written by us is left alone unless `force`.
pub fn install_hook(dir: &Path, binary: &str, force: bool) -> Result<PathBuf> {
   let hooks_dir = git::git_path(dir, "hooks")?;
   let hook_path = hooks_dir.join("prepare-commit-msg");

   if hook_path.exists() && !force {
      let existing = std::fs::read_to_string(&hook_path).unwrap_or_default();
      if !existing.contains(HOOK_MARKER) {
         return Err(CommitGenError::HookExists { path: hook_path });
      }
   }

   std::fs::create_dir_all(&hooks_dir)?;
   std::fs::write(&hook_path, hook_script(binary))?;

   #[cfg(unix)]
   {
      use std::os::unix::fs::PermissionsExt;
      std::fs::set_permissions(&hook_path, std::fs::Permissions::from_mode(0o755))?;
   }

   tracing::debug!(path = %hook_path.display(), "installed hook");
   Ok(hook_path)
}

#[cfg(test)]
mod tests {
   use std::process::Command;

   use super::*;

   fn init_repo() -> tempfile::TempDir {
      let dir = tempfile::tempdir().unwrap();
      let status = Command::new("git")
         .args(["init", "-q"])
         .current_dir(dir.path())
         .status()
         .unwrap();
      assert!(status.success());
      dir
   }

   #[test]
   fn test_shell_quote() {
      assert_eq!(shell_quote("/usr/bin/commit-analyzer"), "'/usr/bin/commit-analyzer'");
      assert_eq!(shell_quote("/tmp/it's here"), r"'/tmp/it'\''s here'");
   }

   #[test]
   fn test_hook_script_shape() {
      let script = hook_script("/opt/bin/commit-analyzer");
      assert!(script.starts_with("#!/bin/sh\n"));
      assert!(script.contains(HOOK_MARKER));
      assert!(script.contains("'/opt/bin/commit-analyzer' --hook \"$1\""));
      assert!(script.contains("message|merge|squash|commit) exit 0"));
      assert!(script.trim_end().ends_with("exit 0"));
   }

   #[test]
   fn test_install_hook_writes_script() {
      let repo = init_repo();
      let path = install_hook(repo.path(), "commit-analyzer", false).unwrap();
      assert!(path.ends_with("hooks/prepare-commit-msg"));
      let contents = std::fs::read_to_string(&path).unwrap();
      assert_eq!(contents, hook_script("commit-analyzer"));

      #[cfg(unix)]
      {
         use std::os::unix::fs::PermissionsExt;
         let mode = std::fs::metadata(&path).unwrap().permissions().mode();
         assert_eq!(mode & 0o111, 0o111);
      }
   }

   #[test]
   fn test_reinstall_over_own_hook() {
      let repo = init_repo();
      install_hook(repo.path(), "old-binary", false).unwrap();
      let path = install_hook(repo.path(), "new-binary", false).unwrap();
      assert!(
         std::fs::read_to_string(path)
            .unwrap()
            .contains("'new-binary'")
      );
   }

   #[test]
   fn test_foreign_hook_preserved_without_force() {
      let repo = init_repo();
      let hooks = repo.path().join(".git").join("hooks");
      std::fs::create_dir_all(&hooks).unwrap();
      let foreign = hooks.join("prepare-commit-msg");
      std::fs::write(&foreign, "#!/bin/sh\necho custom\n").unwrap();

      let err = install_hook(repo.path(), "commit-analyzer", false).unwrap_err();
      assert!(matches!(err, CommitGenError::HookExists { .. }));
      assert_eq!(std::fs::read_to_string(&foreign).unwrap(), "#!/bin/sh\necho custom\n");

      install_hook(repo.path(), "commit-analyzer", true).unwrap();
      assert!(
         std::fs::read_to_string(&foreign)
            .unwrap()
            .contains(HOOK_MARKER)
      );
   }

   #[test]
   fn test_install_outside_repository_fails() {
      let dir = tempfile::tempdir().unwrap();
      let err = install_hook(dir.path(), "commit-analyzer", false).unwrap_err();
      assert!(matches!(err, CommitGenError::GitError(_)));
   }
}
