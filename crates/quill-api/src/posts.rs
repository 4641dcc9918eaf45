//! Handlers for `/posts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/posts` | paginated summaries; `page`, `limit`, `sort`, `query`, `tag` |
//! | `POST`   | `/posts` | authenticated; returns 201 + detail |
//! | `GET`    | `/posts/:id` | detail with comment tree; bumps the view counter |
//! | `PATCH`  | `/posts/:id` | owner only; partial update |
//! | `DELETE` | `/posts/:id` | owner or admin; soft delete, 204 |
//! | `POST`   | `/posts/:id/like` | authenticated; toggles |
//! | `GET`    | `/me/posts` | the caller's own posts |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use quill_core::{
  post::{DeleteMode, NewPost, Post, PostPatch, PostSort},
  store::{BlogStore, PostQuery},
  user::Author,
  view::{PageInfo, PostDetail, PostSummary, assemble_comment_tree},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{CurrentUser, require_admin},
  error::ApiError,
};

/// Listing limits are clamped here, at the boundary — the store only floors.
const MAX_LIMIT: u32 = 50;
const DEFAULT_LIMIT: u32 = 10;

// ─── Shared shaping ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
  pub posts:        Vec<PostSummary>,
  pub total_pages:  u64,
  pub current_page: u32,
}

/// Shape one page of listing rows, fetching each post's comment count.
pub(crate) async fn summary_page<S>(
  store: &S,
  rows: Vec<(Post, Author)>,
  total: u64,
  limit: u32,
  page: u32,
) -> Result<PostListResponse, ApiError>
where
  S: BlogStore,
{
  let mut posts = Vec::with_capacity(rows.len());
  for (post, author) in rows {
    let comment_count = store.comment_count(post.id).await?;
    posts.push(PostSummary::build(&post, author, comment_count));
  }

  let info = PageInfo::new(total, limit, page);
  Ok(PostListResponse {
    posts,
    total_pages: info.total_pages,
    current_page: info.current_page,
  })
}

/// Shape the full detail view: tag names plus the one-level comment tree.
pub(crate) async fn detail_view<S>(
  store: &S,
  post: Post,
  author: Author,
) -> Result<PostDetail, ApiError>
where
  S: BlogStore,
{
  let tags = store.post_tags(post.id).await?;
  let comments = store.list_post_comments(post.id).await?;
  let tree = assemble_comment_tree(&comments);
  Ok(PostDetail::build(post, author, tags, tree))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page:  Option<u32>,
  pub limit: Option<u32>,
  pub sort:  Option<PostSort>,
  /// Case-insensitive substring over title or content.
  pub query: Option<String>,
  pub tag:   Option<String>,
}

impl ListParams {
  pub(crate) fn page(&self) -> u32 { self.page.unwrap_or(1).max(1) }

  pub(crate) fn limit(&self) -> u32 {
    self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
  }
}

/// `GET /posts?page=1&limit=10&sort=latest[&query=...][&tag=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<PostListResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (page, limit) = (params.page(), params.limit());
  let (rows, total) = state
    .store
    .list_posts(PostQuery {
      page,
      limit,
      sort: params.sort.unwrap_or_default(),
      text: params.query,
      tag: params.tag,
      ..PostQuery::default()
    })
    .await?;

  Ok(Json(summary_page(&*state.store, rows, total, limit, page).await?))
}

/// `GET /me/posts`
pub async fn my_posts<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<PostListResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (page, limit) = (params.page(), params.limit());
  let (rows, total) = state
    .store
    .list_posts(PostQuery {
      page,
      limit,
      author_id: Some(user.id),
      ..PostQuery::default()
    })
    .await?;

  Ok(Json(summary_page(&*state.store, rows, total, limit, page).await?))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostCreateBody {
  pub title:   String,
  pub content: String,
  #[serde(default)]
  pub tags:    Vec<String>,
}

/// `POST /posts` — returns 201 + the detail view of the new post.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<PostCreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let post = state
    .store
    .create_post(user.id, NewPost {
      title:   body.title,
      content: body.content,
      tags:    body.tags,
      ..NewPost::default()
    })
    .await?;

  let detail = detail_view(&*state.store, post, Author::from(&user)).await?;
  Ok((StatusCode::CREATED, Json(detail)))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

/// `GET /posts/:id` — increments the view counter as part of the read.
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (post, author) = state
    .store
    .get_post(id, true)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;

  Ok(Json(detail_view(&*state.store, post, author).await?))
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostUpdateBody {
  pub title:   Option<String>,
  pub content: Option<String>,
  pub tags:    Option<Vec<String>>,
}

/// `PATCH /posts/:id` — owner only.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<PostUpdateBody>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (post, author) = state
    .store
    .get_post(id, false)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  if post.author_id != user.id {
    return Err(ApiError::Forbidden("not the author of this post".to_owned()));
  }

  let updated = state
    .store
    .update_post(id, PostPatch {
      title:   body.title,
      content: body.content,
      tags:    body.tags,
    })
    .await?;

  Ok(Json(detail_view(&*state.store, updated, author).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /posts/:id` — soft delete by the owner (or an admin). 204.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (post, _) = state
    .store
    .get_post(id, false)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  if post.author_id != user.id {
    require_admin(&state.config, &user)?;
  }

  state.store.delete_post(id, DeleteMode::Soft).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Like ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
  pub like_count: i64,
  pub user_liked: bool,
}

/// `POST /posts/:id/like` — toggles; strictly alternates on repeated calls.
pub async fn toggle_like<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<LikeResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let outcome = state.store.toggle_like(id, user.id).await?;
  Ok(Json(LikeResponse {
    like_count: outcome.like_count,
    user_liked: outcome.liked,
  }))
}
