//! Attachment row keyed by its owning email.

use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct AttachmentRow {
  pub email_id: i64,
  pub filename: String,
  pub size: String,
  pub url: String,
}
