//! Database row for an email.

use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct EmailRow {
  pub id: i64,
  pub sender_name: String,
  pub sender_email: String,
  pub sender_avatar: Option<String>,
  pub recipient_name: String,
  pub recipient_email: String,
  pub subject: String,
  pub preview: String,
  pub body: String,
  pub date: String,
  pub is_read: i64,
  pub is_archived: i64,
}
