//! Database bootstrap: migrations, seed data, path handling.

use sqlx::SqlitePool;
use std::path::Path;

const MIGRATION_NAME: &str = "001_create_emails_tables";

struct SeedAttachment {
  filename: &'static str,
  size: &'static str,
  url: &'static str,
}

struct SeedEmail {
  sender_name: &'static str,
  sender_email: &'static str,
  sender_avatar: &'static str,
  recipient_name: &'static str,
  recipient_email: &'static str,
  subject: &'static str,
  preview: &'static str,
  body: &'static str,
  date: &'static str,
  is_read: i64,
  is_archived: i64,
  attachments: &'static [SeedAttachment],
}

/// Sample mailbox inserted on first run so the client UI has content.
const SEED_EMAILS: &[SeedEmail] = &[
  SeedEmail {
    sender_name: "Michael Lee",
    sender_email: "michael.lee@company.com",
    sender_avatar: "/avatars/michael.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Follow-Up: Product Demo Feedback",
    preview: "Hi John, Thank you for attending the product demo yesterday.",
    body: "Hi John,\n\nThank you for attending the product demo yesterday. We would love to hear \
           your feedback and discuss next steps for rollout.\n\nBest,\nMichael Lee",
    date: "2024-12-10T09:00:00",
    is_read: 0,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Jane Doe",
    sender_email: "jane.doe@business.com",
    sender_avatar: "/avatars/jane.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Proposal for Partnership",
    preview: "Hi John, hope this message finds you well! I am reaching out to explore a partnership.",
    body: "Hi John,\n\nhope this message finds you well! I am reaching out to explore a potential \
           partnership between our companies. At Jane Corp, which could complement your offerings \
           at John Organisation Corp.\n\nI have attached a proposal detailing how we envision our \
           collaboration, including key benefits, timelines, and implementation strategies. I \
           believe this partnership could unlock exciting opportunities for both of us!\n\nLet me \
           know your thoughts or a convenient time to discuss this further. I am happy to schedule \
           a call or meeting at your earliest convenience. Looking forward to hearing from \
           you!\n\nWarm regards,\nJane Doe",
    date: "2024-12-10T09:00:00",
    is_read: 0,
    is_archived: 0,
    attachments: &[SeedAttachment {
      filename: "Proposal Partnership.pdf",
      size: "1.5 MB",
      url: "/files/proposal-partnership.pdf",
    }],
  },
  SeedEmail {
    sender_name: "Support Team",
    sender_email: "support@contractor.com",
    sender_avatar: "/avatars/support.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Contract Renewal Due",
    preview: "Dear John, This is a reminder that the contract renewal is due next week.",
    body: "Dear John,\n\nThis is a reminder that the contract renewal is due next week. Please \
           review the terms and confirm if you need changes.\n\nRegards,\nSupport Team",
    date: "2024-12-11T08:20:00",
    is_read: 1,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Sarah Connor",
    sender_email: "sarah.connor@strategy.io",
    sender_avatar: "/avatars/sarah.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Meeting Recap: Strategies for 2025",
    preview: "Hi John, Thank you for your insights during yesterday's strategy call.",
    body: "Hi John,\n\nThank you for your insights during yesterday's strategy call. I am sharing \
           the recap and action items for this quarter.\n\nBest,\nSarah Connor",
    date: "2024-12-11T07:35:00",
    is_read: 1,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Downe Johnson",
    sender_email: "downe.johnson@events.io",
    sender_avatar: "/avatars/downe.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Invitation: Annual Client Appreciation",
    preview: "Dear John, We are delighted to invite you to our annual appreciation event.",
    body: "Dear John,\n\nWe are delighted to invite you to our annual client appreciation event \
           this month. Please RSVP when convenient.\n\nRegards,\nDowne Johnson",
    date: "2024-12-11T07:10:00",
    is_read: 1,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Lily Alexa",
    sender_email: "lily.alexa@supportdesk.io",
    sender_avatar: "/avatars/lily.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Technical Support Update",
    preview: "Dear John, Your issue regarding server connectivity has been resolved.",
    body: "Dear John,\n\nYour issue regarding server connectivity has been resolved. Please let us \
           know if you still experience any interruptions.\n\nThanks,\nLily Alexa",
    date: "2024-12-10T15:45:00",
    is_read: 1,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Natasha Brown",
    sender_email: "natasha@kozuki-tea.com",
    sender_avatar: "/avatars/natasha.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Happy Holidays from Kozuki tea",
    preview: "Hi John, As the holiday season approaches, we wanted to share our thanks.",
    body: "Hi John,\n\nAs the holiday season approaches, we wanted to share our thanks for your \
           partnership throughout this year.\n\nWarm wishes,\nNatasha Brown",
    date: "2024-12-10T10:50:00",
    is_read: 1,
    is_archived: 0,
    attachments: &[],
  },
  SeedEmail {
    sender_name: "Downe Johnson",
    sender_email: "downe.johnson@events.io",
    sender_avatar: "/avatars/downe.jpg",
    recipient_name: "Richard Brown",
    recipient_email: "richard@example.com",
    subject: "Invitation: Annual Client Appreciation",
    preview: "Dear John, Friendly reminder to confirm your attendance for next week.",
    body: "Dear John,\n\nFriendly reminder to confirm your attendance for next week's event. We \
           look forward to hosting you.\n\nRegards,\nDowne Johnson",
    date: "2024-12-11T06:00:00",
    is_read: 1,
    is_archived: 1,
    attachments: &[],
  },
];

/// Run SQLite migrations to create and seed tables if absent.
///
/// Applied migrations are recorded by name in `_migrations` and skipped
/// on later startups. Seed rows are inserted only into an empty mailbox.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS _migrations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )"#,
  )
  .execute(pool)
  .await?;

  let applied: Option<i64> = sqlx::query_scalar("SELECT 1 FROM _migrations WHERE name = ?")
    .bind(MIGRATION_NAME)
    .fetch_optional(pool)
    .await?;
  if applied.is_some() {
    return Ok(());
  }

  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS emails (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sender_name TEXT NOT NULL,
        sender_email TEXT NOT NULL,
        sender_avatar TEXT,
        recipient_name TEXT NOT NULL,
        recipient_email TEXT NOT NULL,
        subject TEXT NOT NULL,
        preview TEXT NOT NULL,
        body TEXT NOT NULL,
        date TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        is_archived INTEGER NOT NULL DEFAULT 0
    )"#,
  )
  .execute(pool)
  .await?;

  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS attachments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email_id INTEGER NOT NULL,
        filename TEXT NOT NULL,
        size TEXT NOT NULL,
        url TEXT NOT NULL,
        FOREIGN KEY(email_id) REFERENCES emails(id) ON DELETE CASCADE
    )"#,
  )
  .execute(pool)
  .await?;

  let row_count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM emails")
    .fetch_one(pool)
    .await?;
  if row_count == 0 {
    seed_emails(pool).await?;
  }

  sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
    .bind(MIGRATION_NAME)
    .execute(pool)
    .await?;
  Ok(())
}

async fn seed_emails(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  for email in SEED_EMAILS {
    let result = sqlx::query(
      "INSERT INTO emails (sender_name, sender_email, sender_avatar, recipient_name, \
       recipient_email, subject, preview, body, date, is_read, is_archived) \
       VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(email.sender_name)
    .bind(email.sender_email)
    .bind(email.sender_avatar)
    .bind(email.recipient_name)
    .bind(email.recipient_email)
    .bind(email.subject)
    .bind(email.preview)
    .bind(email.body)
    .bind(email.date)
    .bind(email.is_read)
    .bind(email.is_archived)
    .execute(pool)
    .await?;
    let email_id = result.last_insert_rowid();

    for attachment in email.attachments {
      sqlx::query("INSERT INTO attachments (email_id, filename, size, url) VALUES (?, ?, ?, ?)")
        .bind(email_id)
        .bind(attachment.filename)
        .bind(attachment.size)
        .bind(attachment.url)
        .execute(pool)
        .await?;
    }
  }
  Ok(())
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
  if !db_url.starts_with("sqlite:") {
    return db_url.to_string();
  }
  let path_part = db_url.trim_start_matches("sqlite://");
  if path_part == ":memory:" {
    return db_url.to_string();
  }
  let (path_only, _) = match path_part.split_once('?') {
    Some((path, query)) => (path, Some(query)),
    None => (path_part, None),
  };
  if !path_only.is_empty() {
    let path = Path::new(path_only);
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        let _ = std::fs::create_dir_all(parent);
      }
    }
    let _ = std::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(path);
  }
  db_url.to_string()
}
