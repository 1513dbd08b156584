//! Application setup and runtime.

use crate::{db, http};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::net::SocketAddr;
use tracing::info;

/// Identity stamped as the sender on every created email.
///
/// Passed explicitly into the store at the create boundary instead of
/// living as process-wide state, so the store stays testable with any
/// identity.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
  pub name: String,
  pub email: String,
  pub avatar: Option<String>,
}

impl SenderIdentity {
  /// Resolve the sender identity from the environment, falling back to
  /// the demo account.
  pub fn from_env() -> Self {
    SenderIdentity {
      name: std::env::var("POSTBOX_SENDER_NAME").unwrap_or_else(|_| "Richard Brown".to_string()),
      email: std::env::var("POSTBOX_SENDER_EMAIL")
        .unwrap_or_else(|_| "richard@example.com".to_string()),
      avatar: Some(
        std::env::var("POSTBOX_SENDER_AVATAR")
          .unwrap_or_else(|_| "/avatars/richard.jpg".to_string()),
      ),
    }
  }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub db: SqlitePool,
  pub sender: SenderIdentity,
}

/// Start the HTTP server with configured environment.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let db_url =
    std::env::var("POSTBOX_DATABASE").unwrap_or_else(|_| "sqlite://postbox.db".to_string());
  let db_url = db::ensure_sqlite_path(&db_url);
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;
  db::run_migrations(&pool).await?;

  let state = AppState {
    db: pool.clone(),
    sender: SenderIdentity::from_env(),
  };

  let app = http::build_router(state.clone());

  let addr: SocketAddr = std::env::var("POSTBOX_ADDR")
    .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
    .parse()?;

  info!("mailbox API:          http://{}/emails", addr);
  info!("sending as:           {} <{}>", state.sender.name, state.sender.email);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
