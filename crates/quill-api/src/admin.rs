//! Admin surface: dashboard stats, moderation deletes, announcements.
//!
//! Admin status is decided by [`require_admin`] against the configured email
//! list. Announcements are ordinary posts flagged `is_notice`, so they share
//! the post lifecycle instead of living in a side structure.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use quill_core::{
  post::{DeleteMode, NewPost, Post},
  store::{BlogStore, DashboardStats, PostQuery},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{CurrentUser, require_admin},
  error::ApiError,
  posts::{ListParams, PostListResponse, summary_page},
};

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// `GET /admin/dashboard`
pub async fn dashboard<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardStats>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  require_admin(&state.config, &user)?;
  Ok(Json(state.store.dashboard_stats().await?))
}

/// `GET /admin/posts` — the regular feed, admin-paged.
pub async fn posts<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<PostListResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  require_admin(&state.config, &user)?;

  let (page, limit) = (params.page(), params.limit());
  let (rows, total) = state
    .store
    .list_posts(PostQuery {
      page,
      limit,
      ..PostQuery::default()
    })
    .await?;

  Ok(Json(summary_page(&*state.store, rows, total, limit, page).await?))
}

// ─── Moderation deletes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteType {
  #[default]
  Soft,
  Hard,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDeleteBody {
  #[serde(default)]
  pub delete_type: DeleteType,
}

/// `DELETE /admin/posts/:id` — body `{"deleteType": "soft" | "hard"}`,
/// defaulting to soft. Hard delete also removes rows already soft-deleted.
pub async fn delete_post<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  body: Option<Json<AdminDeleteBody>>,
) -> Result<StatusCode, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  require_admin(&state.config, &user)?;

  let mode = match body.map(|Json(b)| b.delete_type).unwrap_or_default() {
    DeleteType::Soft => DeleteMode::Soft,
    DeleteType::Hard => DeleteMode::Hard,
  };
  state.store.delete_post(id, mode).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/comments/:id`
pub async fn delete_comment<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  require_admin(&state.config, &user)?;
  state.store.delete_comment(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Announcements ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnnouncementCreateBody {
  pub title:   String,
  pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

impl From<Post> for AnnouncementResponse {
  fn from(post: Post) -> Self {
    AnnouncementResponse {
      id:         post.id,
      title:      post.title,
      content:    post.content,
      created_at: post.created_at,
    }
  }
}

/// `POST /admin/announcements` — 201. Stored as a notice-flagged post.
pub async fn create_announcement<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<AnnouncementCreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  require_admin(&state.config, &user)?;

  let post = state
    .store
    .create_post(user.id, NewPost {
      title:     body.title,
      content:   body.content,
      is_notice: true,
      ..NewPost::default()
    })
    .await?;

  Ok((StatusCode::CREATED, Json(AnnouncementResponse::from(post))))
}

/// `GET /announcements` — public; live notices, newest first.
pub async fn announcements<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (rows, _) = state
    .store
    .list_posts(PostQuery {
      limit: 50,
      notice: true,
      ..PostQuery::default()
    })
    .await?;

  Ok(Json(
    rows
      .into_iter()
      .map(|(post, _)| AnnouncementResponse::from(post))
      .collect(),
  ))
}
