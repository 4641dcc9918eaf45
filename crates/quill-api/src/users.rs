//! Handlers for signup, profiles, and the `/me` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use quill_core::{
  store::{BlogStore, PostQuery},
  user::{NewUser, User, UserPatch},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{CurrentUser, hash_password},
  error::ApiError,
  posts::{ListParams, PostListResponse, summary_page},
};

// ─── Responses ───────────────────────────────────────────────────────────────

/// The caller's own account, email included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
  pub id:         i64,
  pub email:      String,
  pub nickname:   String,
  pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    UserResponse {
      id:         user.id,
      email:      user.email,
      nickname:   user.nickname,
      created_at: user.created_at,
    }
  }
}

/// What anyone may see about a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
  pub id:         i64,
  pub nickname:   String,
  pub created_at: DateTime<Utc>,
}

// ─── Signup ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupBody {
  pub email:    String,
  pub password: String,
  pub nickname: String,
}

/// `POST /users/signup` — 201, or 409 when email/nickname is taken.
pub async fn signup<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  for (field, value) in [
    ("email", &body.email),
    ("password", &body.password),
    ("nickname", &body.nickname),
  ] {
    if value.trim().is_empty() {
      return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
  }

  let user = state
    .store
    .create_user(NewUser {
      email:         body.email,
      nickname:      body.nickname,
      password_hash: hash_password(&body.password)?,
    })
    .await?;

  Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ─── Me ──────────────────────────────────────────────────────────────────────

/// `GET /me`
pub async fn me<S>(
  CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  Ok(Json(UserResponse::from(user)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeBody {
  pub nickname: Option<String>,
  pub password: Option<String>,
}

/// `PATCH /me` — partial; a changed nickname can 409.
pub async fn update_me<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<UpdateMeBody>,
) -> Result<Json<UserResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let password_hash = body
    .password
    .as_deref()
    .map(hash_password)
    .transpose()?;

  let updated = state
    .store
    .update_user(user.id, UserPatch {
      nickname: body.nickname,
      password_hash,
    })
    .await?;

  Ok(Json(UserResponse::from(updated)))
}

// ─── Public profiles ─────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn profile<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<PublicUserResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

  Ok(Json(PublicUserResponse {
    id:         user.id,
    nickname:   user.nickname,
    created_at: user.created_at,
  }))
}

/// `GET /users/:id/posts` — the user's live posts, newest first.
pub async fn user_posts<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<ListParams>,
) -> Result<Json<PostListResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  if state.store.get_user(id).await?.is_none() {
    return Err(ApiError::NotFound(format!("user {id} not found")));
  }

  let (page, limit) = (params.page(), params.limit());
  let (rows, total) = state
    .store
    .list_posts(PostQuery {
      page,
      limit,
      author_id: Some(id),
      ..PostQuery::default()
    })
    .await?;

  Ok(Json(summary_page(&*state.store, rows, total, limit, page).await?))
}
