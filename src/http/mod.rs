//! HTTP router and handlers.

use crate::app::AppState;
use axum::{Router, routing::get};

pub mod emails;

/// Assemble the HTTP router with all routes.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route(
      "/emails",
      get(emails::list_emails).post(emails::create_email),
    )
    .route(
      "/emails/:id",
      get(emails::get_email)
        .put(emails::update_email)
        .delete(emails::delete_email),
    )
    .with_state(state)
}
