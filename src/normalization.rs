//! Cleanup of raw model replies into a commit message.
use unicode_normalization::UnicodeNormalization;

use crate::gitmoji::{GitmojiTable, emoji_for_type, find_kind};

/// Phrase models use when they explain instead of answering
pub const META_COMMENTARY_MARKER: &str = "Based on the diff";

/// Unix line endings and NFC. Quotes, emoji and variation selectors pass
/// through untouched.
pub fn normalize_text(text: &str) -> String {
   text.replace("\r\n", "\n").nfc().collect()
}

/// Unwrap a reply that is entirely one fenced code block
fn strip_code_fence(text: &str) -> &str {
   let Some(rest) = text.strip_prefix("```") else {
      return text;
   };
   let Some(inner) = rest.strip_suffix("```") else {
      return text;
   };
   // Drop the info string (```text, ```git) on the opening line
   match inner.split_once('\n') {
      Some((info, body)) if !info.contains(' ') => body.trim(),
      _ => text,
   }
}

/// Turn the raw completion into the commit message.
///
/// When the reply contains [`META_COMMENTARY_MARKER`] only its last line is
/// kept.
pub fn clean_reply(raw: &str) -> String {
   let normalized = normalize_text(raw);
   let message = strip_code_fence(normalized.trim());

   if message.contains(META_COMMENTARY_MARKER) {
      return message.lines().last().unwrap_or_default().trim().to_string();
   }

   message.to_string()
}

/// Split a summary line into `(type, rest_after_colon)` when it is a
/// conventional header such as `feat(cli)!: add hook`.
fn split_header(line: &str) -> Option<(&str, &str)> {
   let (header, rest) = line.split_once(':')?;
   let header = header.strip_suffix('!').unwrap_or(header);
   let commit_type = match header.split_once('(') {
      Some((commit_type, scope)) if scope.ends_with(')') => commit_type,
      Some(_) => return None,
      None => header,
   };
   let valid = !commit_type.is_empty()
      && commit_type
         .chars()
         .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
   valid.then_some((commit_type, rest))
}

/// Prefix the type's glyph when the summary line is a bare
/// `type[(scope)][!]: description` header.
pub fn ensure_gitmoji(message: &str, gitmojis: &GitmojiTable) -> String {
   let (first, rest) = match message.split_once('\n') {
      Some((first, rest)) => (first, Some(rest)),
      None => (message, None),
   };

   let Some((commit_type, _)) = split_header(first) else {
      return message.to_string();
   };
   if find_kind(commit_type).is_none() {
      return message.to_string();
   }

   let glyph = emoji_for_type(commit_type, gitmojis);
   let mut out = format!("{glyph} {first}");
   if let Some(rest) = rest {
      out.push('\n');
      out.push_str(rest);
   }
   out
}
