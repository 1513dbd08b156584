//! API representation of an email.

use serde::Serialize;

use super::contact::Contact;
use super::email_row::EmailRow;
use crate::models::attachment::attachment_meta::AttachmentMeta;

/// Nested external shape of a stored email.
#[derive(Debug, Serialize)]
pub struct ApiEmail {
  pub id: String,
  pub sender: Contact,
  pub recipient: Contact,
  pub subject: String,
  pub preview: String,
  pub body: String,
  pub date: String,
  pub is_read: bool,
  pub is_archived: bool,
  pub attachments: Vec<AttachmentMeta>,
}

impl ApiEmail {
  /// Assemble the nested shape from a flat row and its attachment list.
  ///
  /// Ids cross the boundary as text, the 0/1 flag columns become
  /// booleans, and recipients never carry an avatar.
  pub fn from_row(row: EmailRow, attachments: Vec<AttachmentMeta>) -> Self {
    ApiEmail {
      id: row.id.to_string(),
      sender: Contact {
        name: row.sender_name,
        email: row.sender_email,
        avatar: row.sender_avatar,
      },
      recipient: Contact {
        name: row.recipient_name,
        email: row.recipient_email,
        avatar: None,
      },
      subject: row.subject,
      preview: row.preview,
      body: row.body,
      date: row.date,
      is_read: row.is_read != 0,
      is_archived: row.is_archived != 0,
      attachments,
    }
  }
}
