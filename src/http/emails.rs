//! Email JSON APIs.

use crate::{
  app::AppState,
  models::email::payload::{EmailCreate, EmailUpdate},
  store::{self, StoreError, query::ListFilter},
};
use axum::{
  Json,
  extract::{Path as AxumPath, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub filter: ListFilter,
  pub search: Option<String>,
}

fn storage_error(operation: &'static str, err: StoreError) -> Response {
  error!("{operation} error: {err}");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    format!("storage error: {err}"),
  )
    .into_response()
}

pub async fn list_emails(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> impl IntoResponse {
  match store::list_emails(&state.db, params.filter, params.search.as_deref()).await {
    Ok(emails) => Json(emails).into_response(),
    Err(e) => storage_error("list_emails", e),
  }
}

pub async fn get_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
  match store::fetch_email_by_id(&state.db, id).await {
    Ok(Some(email)) => Json(email).into_response(),
    Ok(None) => (StatusCode::NOT_FOUND, "email not found").into_response(),
    Err(e) => storage_error("get_email", e),
  }
}

pub async fn create_email(
  State(state): State<AppState>,
  Json(payload): Json<EmailCreate>,
) -> impl IntoResponse {
  if let Err(reason) = payload.validate() {
    return (StatusCode::BAD_REQUEST, reason).into_response();
  }
  match store::create_email(&state.db, &state.sender, &payload).await {
    Ok(email) => (StatusCode::CREATED, Json(email)).into_response(),
    Err(e) => storage_error("create_email", e),
  }
}

pub async fn update_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
  Json(payload): Json<EmailUpdate>,
) -> impl IntoResponse {
  if let Err(reason) = payload.validate() {
    return (StatusCode::BAD_REQUEST, reason).into_response();
  }
  match store::update_email(&state.db, id, &payload).await {
    Ok(Some(email)) => Json(email).into_response(),
    Ok(None) => (StatusCode::NOT_FOUND, "email not found").into_response(),
    Err(e) => storage_error("update_email", e),
  }
}

pub async fn delete_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
  match store::delete_email(&state.db, id).await {
    Ok(true) => StatusCode::NO_CONTENT.into_response(),
    Ok(false) => (StatusCode::NOT_FOUND, "email not found").into_response(),
    Err(e) => storage_error("delete_email", e),
  }
}
