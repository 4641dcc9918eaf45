//! Handler for the tag index.

use axum::{Json, extract::State};
use quill_core::{store::BlogStore, tag::TagCount};

use crate::{AppState, error::ApiError};

/// `GET /tags` — every tag with its live-post count, most-used first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<TagCount>>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.list_tags().await?))
}
