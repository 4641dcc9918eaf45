//! Handlers for comment creation, editing, and deletion.
//!
//! Comments are created under their post (`POST /posts/:id/comments`) and
//! addressed directly afterwards (`PATCH`/`DELETE /comments/:id`).

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quill_core::{
  comment::NewComment,
  store::BlogStore,
  user::Author,
  view::{CommentNode, CommentView},
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{CurrentUser, require_admin},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateBody {
  pub content:           String,
  pub parent_comment_id: Option<i64>,
}

/// `POST /posts/:id/comments` — 201. A reply's parent must be a comment on
/// the same post.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(post_id): Path<i64>,
  Json(body): Json<CommentCreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let comment = state
    .store
    .create_comment(post_id, user.id, NewComment {
      content:   body.content,
      parent_id: body.parent_comment_id,
    })
    .await?;

  Ok((
    StatusCode::CREATED,
    Json(CommentNode {
      comment: CommentView::build(&comment, Author::from(&user)),
      replies: Vec::new(),
    }),
  ))
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdateBody {
  pub content: String,
}

/// `PATCH /comments/:id` — owner only.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<CommentUpdateBody>,
) -> Result<Json<CommentNode>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (comment, author) = state
    .store
    .get_comment(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("comment {id} not found")))?;
  if comment.author_id != user.id {
    return Err(ApiError::Forbidden(
      "not the author of this comment".to_owned(),
    ));
  }

  let updated = state.store.update_comment(id, body.content).await?;
  Ok(Json(CommentNode {
    comment: CommentView::build(&updated, author),
    replies: Vec::new(),
  }))
}

/// `DELETE /comments/:id` — owner or admin; hard delete, 204. Replies to the
/// deleted comment stay in storage, orphaned.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let (comment, _) = state
    .store
    .get_comment(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("comment {id} not found")))?;
  if comment.author_id != user.id {
    require_admin(&state.config, &user)?;
  }

  state.store.delete_comment(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
