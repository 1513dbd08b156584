//! Utility functions: tracing setup and preview derivation.

use tracing_subscriber::{EnvFilter, fmt};

/// Maximum display length of a stored preview.
pub const PREVIEW_LIMIT: usize = 64;

/// Initialize pretty CLI logging.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .pretty()
    .init();
}

/// Derive a bounded one-line summary from free-form body text.
///
/// Runs of whitespace (newlines included) collapse to single spaces.
/// Results longer than `limit` characters keep the first `limit - 3`
/// characters, trimmed of trailing whitespace, plus a `...` marker.
pub fn build_preview(text: &str, limit: usize) -> String {
  let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if normalized.chars().count() <= limit {
    return normalized;
  }
  let cut: String = normalized.chars().take(limit - 3).collect();
  format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
  use super::{PREVIEW_LIMIT, build_preview};

  #[test]
  fn short_text_passes_through_normalized() {
    assert_eq!(build_preview("a   b\nc", PREVIEW_LIMIT), "a b c");
    assert_eq!(build_preview("  padded  ", PREVIEW_LIMIT), "padded");
    assert_eq!(build_preview("", PREVIEW_LIMIT), "");
  }

  #[test]
  fn long_text_is_truncated_with_marker() {
    let body = "x".repeat(100);
    let preview = build_preview(&body, PREVIEW_LIMIT);
    assert_eq!(preview.chars().count(), PREVIEW_LIMIT);
    assert!(preview.ends_with("..."));
    assert_eq!(preview, format!("{}...", "x".repeat(61)));
  }

  #[test]
  fn truncation_trims_trailing_whitespace_before_marker() {
    // A space falls exactly on the cut boundary.
    let body = format!("{} {}", "y".repeat(60), "z".repeat(40));
    let preview = build_preview(&body, PREVIEW_LIMIT);
    assert_eq!(preview, format!("{}...", "y".repeat(60)));
  }

  #[test]
  fn boundary_length_is_not_truncated() {
    let body = "w".repeat(PREVIEW_LIMIT);
    assert_eq!(build_preview(&body, PREVIEW_LIMIT), body);
  }
}
