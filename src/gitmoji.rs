//! Commit type keywords and their gitmoji glyphs.
//!
//! The built-in table carries a default glyph per type. A `gitmojis.json`
//! document (the format published by the gitmoji project) can override any of
//! them by semantic name.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, style};

/// One commit type the generator may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitKind {
   /// Conventional-commit keyword (`feat`, `fix`, ...)
   pub keyword:     &'static str,
   /// Semantic name in the gitmoji table (`sparkles`, `bug`, ...)
   pub gitmoji:     &'static str,
   pub glyph:       &'static str,
   pub description: &'static str,
   /// Core conventional-commit type, as opposed to the gitmoji extensions
   pub core:        bool,
}

const fn kind(
   keyword: &'static str,
   gitmoji: &'static str,
   glyph: &'static str,
   description: &'static str,
   core: bool,
) -> CommitKind {
   CommitKind { keyword, gitmoji, glyph, description, core }
}

pub const COMMIT_KINDS: &[CommitKind] = &[
   kind("feat", "sparkles", "\u{2728}", "A new feature", true),
   kind("fix", "bug", "\u{1F41B}", "A bug fix", true),
   kind("docs", "memo", "\u{1F4DD}", "Documentation only changes", true),
   kind("style", "art", "\u{1F3A8}", "Changes that don't affect the meaning of the code", true),
   kind(
      "refactor",
      "recycle",
      "\u{267B}\u{FE0F}",
      "A code change that neither fixes a bug nor adds a feature",
      true,
   ),
   kind("perf", "zap", "\u{26A1}\u{FE0F}", "A code change that improves performance", true),
   kind("test", "white-check-mark", "\u{2705}", "Adding missing tests or correcting existing tests", true),
   kind("chore", "wrench", "\u{1F527}", "Changes to build process or auxiliary tools", true),
   kind("ci", "construction-worker", "\u{1F477}", "Changes to CI configuration files and scripts", true),
   kind("security", "lock", "\u{1F512}", "Security fixes", false),
   kind("deps", "package", "\u{1F4E6}", "Dependencies", false),
   kind("breaking", "boom", "\u{1F4A5}", "Breaking changes", false),
   kind("ui", "lipstick", "\u{1F484}", "UI/style changes", false),
   kind("i18n", "globe-with-meridians", "\u{1F310}", "Internationalization", false),
   kind("typo", "pencil2", "\u{270F}\u{FE0F}", "Fix typos", false),
   kind("init", "tada", "\u{1F389}", "Initial commit", false),
   kind("license", "page-facing-up", "\u{1F4C4}", "License", false),
   kind("docker", "whale", "\u{1F433}", "Docker", false),
   kind("config", "wrench", "\u{1F527}", "Configuration changes", false),
   kind("access", "wheelchair", "\u{267F}\u{FE0F}", "Accessibility", false),
   kind("logs", "loud-sound", "\u{1F50A}", "Logging", false),
   kind("db", "card-file-box", "\u{1F5C3}\u{FE0F}", "Database", false),
   kind("cleanup", "fire", "\u{1F525}", "Remove code/files", false),
   kind("wip", "construction", "\u{1F6A7}", "Work in progress", false),
   kind("move", "truck", "\u{1F69A}", "Move/rename files", false),
   kind("revert", "rewind", "\u{23EA}", "Revert changes", false),
   kind("merge", "twisted-rightwards-arrows", "\u{1F500}", "Merge branches", false),
   kind("responsive", "iphone", "\u{1F4F1}", "Responsive design", false),
   kind("hotfix", "ambulance", "\u{1F691}", "Critical hotfix", false),
];

/// Look up a commit kind by keyword
pub fn find_kind(keyword: &str) -> Option<&'static CommitKind> {
   COMMIT_KINDS.iter().find(|k| k.keyword == keyword)
}

#[derive(Debug, Deserialize)]
struct GitmojiRecord {
   name:  String,
   emoji: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GitmojiDocument {
   Wrapped { gitmojis: Vec<GitmojiRecord> },
   Bare(Vec<GitmojiRecord>),
}

/// Glyphs keyed by gitmoji name, loaded from an external document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitmojiTable {
   by_name: HashMap<String, String>,
}

impl GitmojiTable {
   pub fn from_json(json: &str) -> Result<Self> {
      let records = match serde_json::from_str::<GitmojiDocument>(json)? {
         GitmojiDocument::Wrapped { gitmojis } => gitmojis,
         GitmojiDocument::Bare(records) => records,
      };
      let by_name = records.into_iter().map(|r| (r.name, r.emoji)).collect();
      Ok(Self { by_name })
   }

   pub fn load(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path)?;
      Self::from_json(&contents)
   }

   /// Load the table, or fall back to an empty one. Only a file that exists but
   /// cannot be read or parsed is worth a warning.
   pub fn load_or_empty(path: &Path) -> Self {
      if !path.exists() {
         tracing::debug!(path = %path.display(), "no gitmoji table, using built-in glyphs");
         return Self::default();
      }
      match Self::load(path) {
         Ok(table) => {
            tracing::debug!(path = %path.display(), entries = table.len(), "loaded gitmojis");
            table
         },
         Err(e) => {
            style::warn(&format!("Error loading gitmojis: {e}"));
            Self::default()
         },
      }
   }

   pub fn get(&self, name: &str) -> Option<&str> {
      self.by_name.get(name).map(String::as_str)
   }

   pub fn len(&self) -> usize {
      self.by_name.len()
   }

   pub fn is_empty(&self) -> bool {
      self.by_name.is_empty()
   }
}

impl FromIterator<(String, String)> for GitmojiTable {
   fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
      Self { by_name: iter.into_iter().collect() }
   }
}

/// Map a commit type keyword to its glyph. Unknown keywords map to `""`.
pub fn emoji_for_type<'a>(commit_type: &str, gitmojis: &'a GitmojiTable) -> &'a str {
   find_kind(commit_type).map_or("", |kind| gitmojis.get(kind.gitmoji).unwrap_or(kind.glyph))
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_every_kind_has_default_glyph() {
      let empty = GitmojiTable::default();
      for kind in COMMIT_KINDS {
         let glyph = emoji_for_type(kind.keyword, &empty);
         assert!(!glyph.is_empty(), "{} has no glyph", kind.keyword);
         assert_eq!(glyph, kind.glyph);
      }
   }

   #[test]
   fn test_documented_defaults() {
      let empty = GitmojiTable::default();
      let expected = [
         ("feat", "✨"),
         ("fix", "🐛"),
         ("docs", "📝"),
         ("style", "🎨"),
         ("refactor", "♻️"),
         ("perf", "⚡️"),
         ("test", "✅"),
         ("chore", "🔧"),
         ("ci", "👷"),
         ("security", "🔒"),
         ("deps", "📦"),
         ("breaking", "💥"),
         ("ui", "💄"),
         ("i18n", "🌐"),
         ("typo", "✏️"),
         ("init", "🎉"),
         ("license", "📄"),
         ("docker", "🐳"),
         ("config", "🔧"),
         ("access", "♿️"),
         ("logs", "🔊"),
         ("db", "🗃️"),
         ("cleanup", "🔥"),
         ("wip", "🚧"),
         ("move", "🚚"),
         ("revert", "⏪"),
         ("merge", "🔀"),
         ("responsive", "📱"),
         ("hotfix", "🚑"),
      ];
      assert_eq!(expected.len(), COMMIT_KINDS.len());
      for (keyword, glyph) in expected {
         assert_eq!(emoji_for_type(keyword, &empty), glyph, "glyph for {keyword}");
      }
   }

   #[test]
   fn test_unknown_type_is_empty() {
      let empty = GitmojiTable::default();
      assert_eq!(emoji_for_type("feature", &empty), "");
      assert_eq!(emoji_for_type("", &empty), "");
      assert_eq!(emoji_for_type("FEAT", &empty), "");
   }

   #[test]
   fn test_loaded_table_overrides_by_name() {
      let table: GitmojiTable = [("bug".to_string(), "🪲".to_string())]
         .into_iter()
         .collect();
      assert_eq!(emoji_for_type("fix", &table), "🪲");
      assert_eq!(emoji_for_type("feat", &table), "✨");
   }

   #[test]
   fn test_shared_gitmoji_name_overrides_both_types() {
      let table: GitmojiTable = [("wrench".to_string(), "🛠️".to_string())]
         .into_iter()
         .collect();
      assert_eq!(emoji_for_type("chore", &table), "🛠️");
      assert_eq!(emoji_for_type("config", &table), "🛠️");
   }

   #[test]
   fn test_from_json_wrapped_document() {
      let json = r#"{
         "$schema": "https://gitmoji.dev/api/gitmojis/schema",
         "gitmojis": [
            {"emoji": "🎨", "entity": "&#x1f3a8;", "code": ":art:", "name": "art", "semver": null},
            {"emoji": "⚡️", "code": ":zap:", "name": "zap", "semver": "patch"}
         ]
      }"#;
      let table = GitmojiTable::from_json(json).unwrap();
      assert_eq!(table.len(), 2);
      assert_eq!(table.get("art"), Some("🎨"));
      assert_eq!(table.get("zap"), Some("⚡️"));
   }

   #[test]
   fn test_from_json_bare_array() {
      let table = GitmojiTable::from_json(r#"[{"name": "bug", "emoji": "🐞"}]"#).unwrap();
      assert_eq!(table.get("bug"), Some("🐞"));
   }

   #[test]
   fn test_from_json_rejects_records_without_emoji() {
      assert!(GitmojiTable::from_json(r#"{"gitmojis": [{"name": "bug"}]}"#).is_err());
   }

   #[test]
   fn test_load_or_empty_missing_file() {
      let dir = tempfile::tempdir().unwrap();
      let table = GitmojiTable::load_or_empty(&dir.path().join("gitmojis.json"));
      assert!(table.is_empty());
   }

   #[test]
   fn test_load_or_empty_malformed_file() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("gitmojis.json");
      std::fs::write(&path, "{\"gitmojis\": [").unwrap();
      assert!(GitmojiTable::load_or_empty(&path).is_empty());
   }

   #[test]
   fn test_load_from_disk() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("gitmojis.json");
      std::fs::write(&path, r#"{"gitmojis": [{"name": "sparkles", "emoji": "🌟"}]}"#).unwrap();
      let table = GitmojiTable::load_or_empty(&path);
      assert_eq!(emoji_for_type("feat", &table), "🌟");
   }
}
