//! Data access for emails and their attachments.
//!
//! Sole owner of persisted state. Every mutating operation runs inside a
//! single transaction so an email row and its attachment set are written
//! or removed together; the transaction rolls back on drop for every
//! early-exit path.

pub mod query;
pub mod update;

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::app::SenderIdentity;
use crate::models::attachment::attachment_meta::AttachmentMeta;
use crate::models::attachment::attachment_row::AttachmentRow;
use crate::models::email::api_email::ApiEmail;
use crate::models::email::email_row::EmailRow;
use crate::models::email::payload::{EmailCreate, EmailUpdate};
use crate::util::{PREVIEW_LIMIT, build_preview};
use query::{ListFilter, ListQuery};
use update::{SqlValue, UpdateSet};

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error(transparent)]
  Database(#[from] sqlx::Error),

  /// A row written in the current transaction could not be read back.
  #[error("email written but missing on re-read")]
  MissingAfterWrite,
}

const EMAIL_COLUMNS: &str = "id, sender_name, sender_email, sender_avatar, recipient_name, \
                             recipient_email, subject, preview, body, date, is_read, is_archived";

/// Unread first, newest first, lowest id as the final tie-break.
const LIST_ORDER: &str = "is_read ASC, date DESC, id ASC";

/// Fetch one email with its attachments; `None` when the id is unknown.
pub async fn fetch_email_by_id(
  pool: &SqlitePool,
  email_id: i64,
) -> Result<Option<ApiEmail>, StoreError> {
  let mut conn = pool.acquire().await?;
  Ok(fetch_by_id(&mut conn, email_id).await?)
}

/// List emails for a filter and optional search term.
///
/// Attachments for the whole result set are fetched in one pass and
/// grouped by email id rather than queried per row.
pub async fn list_emails(
  pool: &SqlitePool,
  filter: ListFilter,
  search: Option<&str>,
) -> Result<Vec<ApiEmail>, StoreError> {
  let list_query = ListQuery::new(filter, search);
  let sql = format!(
    "SELECT {EMAIL_COLUMNS} FROM emails WHERE {} ORDER BY {LIST_ORDER}",
    list_query.where_clause()
  );
  let mut rows_query = sqlx::query_as::<_, EmailRow>(&sql);
  for param in list_query.params() {
    rows_query = rows_query.bind(param);
  }

  let mut conn = pool.acquire().await?;
  let rows = rows_query.fetch_all(&mut *conn).await?;
  let email_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
  let mut attachments = fetch_attachments_for_ids(&mut conn, &email_ids).await?;

  Ok(
    rows
      .into_iter()
      .map(|row| {
        let own = attachments.remove(&row.id).unwrap_or_default();
        ApiEmail::from_row(row, own)
      })
      .collect(),
  )
}

/// Insert a new outgoing email and its attachments.
///
/// The sender columns come from the passed identity, the creation
/// timestamp is the current UTC time at whole-second precision, and new
/// mail starts read and unarchived. The record is re-read inside the
/// transaction before committing.
pub async fn create_email(
  pool: &SqlitePool,
  sender: &SenderIdentity,
  payload: &EmailCreate,
) -> Result<ApiEmail, StoreError> {
  let date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
  let preview = build_preview(&payload.body, PREVIEW_LIMIT);

  let mut tx = pool.begin().await?;
  let result = sqlx::query(
    "INSERT INTO emails (sender_name, sender_email, sender_avatar, recipient_name, \
     recipient_email, subject, preview, body, date, is_read, is_archived) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, 0)",
  )
  .bind(&sender.name)
  .bind(&sender.email)
  .bind(sender.avatar.as_deref())
  .bind(&payload.recipient.name)
  .bind(&payload.recipient.email)
  .bind(payload.subject.trim())
  .bind(&preview)
  .bind(payload.body.trim())
  .bind(&date)
  .execute(&mut *tx)
  .await?;
  let email_id = result.last_insert_rowid();

  insert_attachments(&mut tx, email_id, &payload.attachments).await?;

  let created = fetch_by_id(&mut tx, email_id)
    .await?
    .ok_or(StoreError::MissingAfterWrite)?;
  tx.commit().await?;
  Ok(created)
}

/// Apply a partial update; `None` when the id is unknown.
///
/// Only columns collected from the payload are written. An attachments
/// list in the payload, even an empty one, replaces the stored set. A
/// payload carrying nothing still re-reads and returns the current
/// record.
pub async fn update_email(
  pool: &SqlitePool,
  email_id: i64,
  payload: &EmailUpdate,
) -> Result<Option<ApiEmail>, StoreError> {
  let mut tx = pool.begin().await?;
  let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM emails WHERE id = ?")
    .bind(email_id)
    .fetch_optional(&mut *tx)
    .await?;
  if existing.is_none() {
    return Ok(None);
  }

  let set = UpdateSet::from_payload(payload);
  if !set.is_empty() {
    let sql = format!("UPDATE emails SET {} WHERE id = ?", set.set_clause());
    let mut update_query = sqlx::query(&sql);
    for value in set.values() {
      update_query = match value {
        SqlValue::Integer(integer) => update_query.bind(*integer),
        SqlValue::Text(text) => update_query.bind(text.as_str()),
      };
    }
    update_query.bind(email_id).execute(&mut *tx).await?;
  }

  if let Some(attachments) = &payload.attachments {
    sqlx::query("DELETE FROM attachments WHERE email_id = ?")
      .bind(email_id)
      .execute(&mut *tx)
      .await?;
    insert_attachments(&mut tx, email_id, attachments).await?;
  }

  // A concurrent delete between the existence check and this re-read
  // reports as not-found; nothing is committed in that case.
  let updated = fetch_by_id(&mut tx, email_id).await?;
  if updated.is_some() {
    tx.commit().await?;
  }
  Ok(updated)
}

/// Delete an email and its attachments; `false` when the id is unknown.
pub async fn delete_email(pool: &SqlitePool, email_id: i64) -> Result<bool, StoreError> {
  let mut tx = pool.begin().await?;
  let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM emails WHERE id = ?")
    .bind(email_id)
    .fetch_optional(&mut *tx)
    .await?;
  if existing.is_none() {
    return Ok(false);
  }

  sqlx::query("DELETE FROM attachments WHERE email_id = ?")
    .bind(email_id)
    .execute(&mut *tx)
    .await?;
  sqlx::query("DELETE FROM emails WHERE id = ?")
    .bind(email_id)
    .execute(&mut *tx)
    .await?;
  tx.commit().await?;
  Ok(true)
}

async fn fetch_by_id(
  conn: &mut SqliteConnection,
  email_id: i64,
) -> Result<Option<ApiEmail>, sqlx::Error> {
  let sql = format!("SELECT {EMAIL_COLUMNS} FROM emails WHERE id = ?");
  let row = sqlx::query_as::<_, EmailRow>(&sql)
    .bind(email_id)
    .fetch_optional(&mut *conn)
    .await?;
  let Some(row) = row else {
    return Ok(None);
  };
  let mut attachments = fetch_attachments_for_ids(conn, &[email_id]).await?;
  let own = attachments.remove(&email_id).unwrap_or_default();
  Ok(Some(ApiEmail::from_row(row, own)))
}

async fn fetch_attachments_for_ids(
  conn: &mut SqliteConnection,
  email_ids: &[i64],
) -> Result<HashMap<i64, Vec<AttachmentMeta>>, sqlx::Error> {
  let mut grouped: HashMap<i64, Vec<AttachmentMeta>> =
    email_ids.iter().map(|id| (*id, Vec::new())).collect();
  if email_ids.is_empty() {
    return Ok(grouped);
  }

  let placeholders = vec!["?"; email_ids.len()].join(",");
  let sql = format!(
    "SELECT email_id, filename, size, url FROM attachments \
     WHERE email_id IN ({placeholders}) ORDER BY id"
  );
  let mut rows_query = sqlx::query_as::<_, AttachmentRow>(&sql);
  for id in email_ids {
    rows_query = rows_query.bind(*id);
  }
  let rows = rows_query.fetch_all(&mut *conn).await?;

  for row in rows {
    grouped.entry(row.email_id).or_default().push(AttachmentMeta {
      filename: row.filename,
      size: row.size,
      url: row.url,
    });
  }
  Ok(grouped)
}

async fn insert_attachments(
  conn: &mut SqliteConnection,
  email_id: i64,
  attachments: &[AttachmentMeta],
) -> Result<(), sqlx::Error> {
  for attachment in attachments {
    sqlx::query("INSERT INTO attachments (email_id, filename, size, url) VALUES (?, ?, ?, ?)")
      .bind(email_id)
      .bind(&attachment.filename)
      .bind(&attachment.size)
      .bind(&attachment.url)
      .execute(&mut *conn)
      .await?;
  }
  Ok(())
}
