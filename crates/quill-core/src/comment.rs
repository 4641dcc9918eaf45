//! Comment — owned by a post and an author, with an optional non-owning
//! reference to a parent comment by id.
//!
//! The store permits arbitrary reply depth; the view layer nests exactly one
//! level. Deleting a parent leaves its replies orphaned — preserved behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
  pub id:         i64,
  pub post_id:    i64,
  pub author_id:  i64,
  /// `Some` marks this comment as a reply. The referenced comment must
  /// belong to the same post at creation time.
  pub parent_id:  Option<i64>,
  pub content:    String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input for [`BlogStore::create_comment`](crate::store::BlogStore::create_comment).
#[derive(Debug, Clone, Default)]
pub struct NewComment {
  pub content:   String,
  pub parent_id: Option<i64>,
}

impl NewComment {
  pub fn validate(&self) -> Result<()> {
    if self.content.trim().is_empty() {
      return Err(Error::EmptyField("content"));
    }
    Ok(())
  }
}
