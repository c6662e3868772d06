//! Small string helpers used across modules.

/// Replace the first exact occurrence of `needle`. None if it doesn't occur (or is empty).
pub fn replace_first(haystack: &str, needle: &str, with: &str) -> Option<String> {
  if needle.is_empty() {
    return None;
  }
  let at = haystack.find(needle)?;
  let mut out = String::with_capacity(haystack.len() + with.len());
  out.push_str(&haystack[..at]);
  out.push_str(with);
  out.push_str(&haystack[at + needle.len()..]);
  Some(out)
}

/// Uppercase the first character, leave the rest as is ("eSports" -> "ESports").
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Log-safe truncation for large strings, on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replace_first_only_touches_first_match() {
    assert_eq!(replace_first("a cat and a cat", "cat", "_").as_deref(), Some("a _ and a cat"));
    assert_eq!(replace_first("nothing here", "cat", "_"), None);
    assert_eq!(replace_first("abc", "", "_"), None);
  }

  #[test]
  fn capitalize_first_handles_unicode_and_empty() {
    assert_eq!(capitalize_first("ample"), "Ample");
    assert_eq!(capitalize_first("élan"), "Élan");
    assert_eq!(capitalize_first(""), "");
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let t = trunc_for_log("日本語のテキスト", 4);
    assert!(t.starts_with("日"), "{t}");
  }
}
