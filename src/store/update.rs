//! Partial-update column collection.

use crate::models::email::payload::EmailUpdate;
use crate::util::{PREVIEW_LIMIT, build_preview};

/// A value bound into an UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
  Integer(i64),
  Text(String),
}

/// The columns one partial update writes, in payload order.
///
/// Only fields present in the payload produce assignments; everything
/// else stays untouched. A body change always recomputes the stored
/// preview, and recipient changes write both name and email columns.
#[derive(Debug, Default)]
pub struct UpdateSet {
  assignments: Vec<(&'static str, SqlValue)>,
}

impl UpdateSet {
  pub fn from_payload(payload: &EmailUpdate) -> Self {
    let mut set = UpdateSet::default();
    if let Some(is_read) = payload.is_read {
      set.push("is_read", SqlValue::Integer(is_read as i64));
    }
    if let Some(is_archived) = payload.is_archived {
      set.push("is_archived", SqlValue::Integer(is_archived as i64));
    }
    if let Some(subject) = &payload.subject {
      set.push("subject", SqlValue::Text(subject.trim().to_string()));
    }
    if let Some(body) = &payload.body {
      let body = body.trim().to_string();
      set.push("preview", SqlValue::Text(build_preview(&body, PREVIEW_LIMIT)));
      set.push("body", SqlValue::Text(body));
    }
    if let Some(recipient) = &payload.recipient {
      set.push("recipient_name", SqlValue::Text(recipient.name.trim().to_string()));
      set.push("recipient_email", SqlValue::Text(recipient.email.trim().to_string()));
    }
    set
  }

  pub fn is_empty(&self) -> bool {
    self.assignments.is_empty()
  }

  /// SET clause body, one `column = ?` per assignment.
  pub fn set_clause(&self) -> String {
    self
      .assignments
      .iter()
      .map(|(column, _)| format!("{column} = ?"))
      .collect::<Vec<_>>()
      .join(", ")
  }

  /// Values to bind, in the same order as [`UpdateSet::set_clause`].
  pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
    self.assignments.iter().map(|(_, value)| value)
  }

  fn push(&mut self, column: &'static str, value: SqlValue) {
    self.assignments.push((column, value));
  }
}

#[cfg(test)]
mod tests {
  use super::{SqlValue, UpdateSet};
  use crate::models::email::contact::Contact;
  use crate::models::email::payload::EmailUpdate;

  #[test]
  fn empty_payload_collects_nothing() {
    let set = UpdateSet::from_payload(&EmailUpdate::default());
    assert!(set.is_empty());
    assert_eq!(set.set_clause(), "");
  }

  #[test]
  fn body_change_recomputes_preview() {
    let payload = EmailUpdate {
      body: Some("  a   b\nc  ".to_string()),
      ..EmailUpdate::default()
    };
    let set = UpdateSet::from_payload(&payload);
    assert_eq!(set.set_clause(), "preview = ?, body = ?");
    let values: Vec<&SqlValue> = set.values().collect();
    assert_eq!(values[0], &SqlValue::Text("a b c".to_string()));
    // Body is trimmed only; internal whitespace is preserved.
    assert_eq!(values[1], &SqlValue::Text("a   b\nc".to_string()));
  }

  #[test]
  fn flags_and_recipient_collect_typed_columns() {
    let payload = EmailUpdate {
      is_read: Some(false),
      recipient: Some(Contact {
        name: " Jane Doe ".to_string(),
        email: " jane@business.com ".to_string(),
        avatar: None,
      }),
      ..EmailUpdate::default()
    };
    let set = UpdateSet::from_payload(&payload);
    assert_eq!(
      set.set_clause(),
      "is_read = ?, recipient_name = ?, recipient_email = ?"
    );
    let values: Vec<&SqlValue> = set.values().collect();
    assert_eq!(values[0], &SqlValue::Integer(0));
    assert_eq!(values[1], &SqlValue::Text("Jane Doe".to_string()));
    assert_eq!(values[2], &SqlValue::Text("jane@business.com".to_string()));
  }
}
