//! Create and update request payloads.

use serde::Deserialize;

use super::contact::Contact;
use crate::models::attachment::attachment_meta::AttachmentMeta;

/// Body of `POST /emails`.
#[derive(Debug, Deserialize)]
pub struct EmailCreate {
  pub recipient: Contact,
  pub subject: String,
  pub body: String,
  #[serde(default)]
  pub attachments: Vec<AttachmentMeta>,
}

/// Body of `PUT /emails/{id}`. Absent fields are left untouched; an
/// `attachments` list, even an empty one, replaces the stored set.
#[derive(Debug, Default, Deserialize)]
pub struct EmailUpdate {
  pub is_read: Option<bool>,
  pub is_archived: Option<bool>,
  pub subject: Option<String>,
  pub body: Option<String>,
  pub recipient: Option<Contact>,
  pub attachments: Option<Vec<AttachmentMeta>>,
}

fn check_recipient(recipient: &Contact) -> Result<(), &'static str> {
  if recipient.name.trim().is_empty() {
    return Err("recipient name must not be empty");
  }
  if recipient.email.trim().chars().count() < 3 {
    return Err("recipient email must be at least 3 characters");
  }
  Ok(())
}

fn check_attachments(attachments: &[AttachmentMeta]) -> Result<(), &'static str> {
  for attachment in attachments {
    if attachment.filename.is_empty() || attachment.size.is_empty() || attachment.url.is_empty() {
      return Err("attachment filename, size and url must not be empty");
    }
  }
  Ok(())
}

impl EmailCreate {
  /// Reject payloads that would violate storage constraints.
  pub fn validate(&self) -> Result<(), &'static str> {
    check_recipient(&self.recipient)?;
    if self.subject.trim().is_empty() {
      return Err("subject must not be empty");
    }
    if self.body.trim().is_empty() {
      return Err("body must not be empty");
    }
    check_attachments(&self.attachments)
  }
}

impl EmailUpdate {
  /// Validate only the parts the partial payload carries.
  pub fn validate(&self) -> Result<(), &'static str> {
    if let Some(recipient) = &self.recipient {
      check_recipient(recipient)?;
    }
    if let Some(attachments) = &self.attachments {
      check_attachments(attachments)?;
    }
    Ok(())
  }
}
