//! Attachment metadata exposed through the API.

use serde::{Deserialize, Serialize};

/// File metadata attached to an email. No binary content is stored;
/// `size` is a display string such as `"1.5 MB"`, not a byte count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentMeta {
  pub filename: String,
  pub size: String,
  pub url: String,
}
