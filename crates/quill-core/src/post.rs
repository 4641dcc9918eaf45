//! Post — the central entity of the blog.
//!
//! Posts soft-delete via `deleted_at`; a row with the marker set is invisible
//! to every read path except the admin hard delete. The two counters are
//! mutated exclusively by the repository layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A blog post row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
  pub id:         i64,
  pub author_id:  i64,
  pub title:      String,
  pub content:    String,
  pub view_count: i64,
  pub like_count: i64,
  /// Announcements are ordinary posts with this flag set; they are listed
  /// through their own query population, not mixed into the regular feed.
  pub is_notice:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for [`BlogStore::create_post`](crate::store::BlogStore::create_post).
#[derive(Debug, Clone, Default)]
pub struct NewPost {
  pub title:     String,
  pub content:   String,
  /// Tag names, created on first use. Duplicates collapse to one link.
  pub tags:      Vec<String>,
  pub is_notice: bool,
}

impl NewPost {
  /// Empty required fields are a policy violation at this layer, not just at
  /// the boundary.
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::EmptyField("title"));
    }
    if self.content.trim().is_empty() {
      return Err(Error::EmptyField("content"));
    }
    Ok(())
  }
}

/// Partial update. `None` means unchanged — distinct from an empty string,
/// which is rejected. `tags: Some(_)` replaces the full link set, even when
/// the list is empty.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
  pub title:   Option<String>,
  pub content: Option<String>,
  pub tags:    Option<Vec<String>>,
}

impl PostPatch {
  pub fn validate(&self) -> Result<()> {
    if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
      return Err(Error::EmptyField("title"));
    }
    if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
      return Err(Error::EmptyField("content"));
    }
    Ok(())
  }
}

/// Listing sort order. Ties break by id ascending in both cases so pages are
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
  /// `created_at` descending.
  #[default]
  Latest,
  /// `like_count` descending.
  Popular,
}

/// Whether a delete removes the row or only marks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
  /// Set `deleted_at`; the row survives for admin hard deletion.
  Soft,
  /// Remove the row and cascade dependent comments, likes, and tag links.
  Hard,
}

/// Result of a like toggle: the committed counter and the new membership
/// state for the calling user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
  pub like_count: i64,
  pub liked:      bool,
}
