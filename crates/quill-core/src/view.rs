//! Response shaping — the computed read models for the boundary layer.
//!
//! Pure transformation only: nothing here performs I/O or persists state.
//! The repository hands over flat rows; this module assembles summaries,
//! detail views, the one-level comment tree, and pagination metadata.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{comment::Comment, post::Post, user::Author};

/// Character budget for a post summary.
pub const SUMMARY_LEN: usize = 100;

// ─── Summaries ───────────────────────────────────────────────────────────────

/// First [`SUMMARY_LEN`] characters of the content, with an ellipsis suffix
/// only when something was cut.
pub fn summarize(content: &str) -> String {
  let mut chars = content.char_indices();
  match chars.nth(SUMMARY_LEN) {
    Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
    None => content.to_owned(),
  }
}

/// A post as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
  pub id:            i64,
  pub title:         String,
  pub summary:       String,
  pub like_count:    i64,
  pub comment_count: u64,
  pub author:        Author,
  pub created_at:    DateTime<Utc>,
}

impl PostSummary {
  pub fn build(post: &Post, author: Author, comment_count: u64) -> Self {
    PostSummary {
      id:            post.id,
      title:         post.title.clone(),
      summary:       summarize(&post.content),
      like_count:    post.like_count,
      comment_count,
      author,
      created_at:    post.created_at,
    }
  }
}

// ─── Detail view ─────────────────────────────────────────────────────────────

/// A single comment in a response, flattened into its node when top-level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
  pub id:                i64,
  pub content:           String,
  pub author:            Author,
  pub created_at:        DateTime<Utc>,
  pub parent_comment_id: Option<i64>,
}

impl CommentView {
  pub fn build(comment: &Comment, author: Author) -> Self {
    CommentView {
      id:                comment.id,
      content:           comment.content.clone(),
      author,
      created_at:        comment.created_at,
      parent_comment_id: comment.parent_id,
    }
  }
}

/// A top-level comment with its direct replies. The response nests exactly
/// one level; replies-of-replies stay in storage but are not displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
  #[serde(flatten)]
  pub comment: CommentView,
  pub replies: Vec<CommentView>,
}

/// Build the one-level tree from the flat, `created_at`-ordered comment list
/// of a single post.
///
/// Top-level comments (no parent reference) become nodes in input order;
/// each reply attaches to its direct parent when that parent is top-level.
/// A reply whose parent is itself a reply — or was deleted — is omitted.
pub fn assemble_comment_tree(comments: &[(Comment, Author)]) -> Vec<CommentNode> {
  let mut nodes: Vec<CommentNode> = Vec::new();
  let mut index: HashMap<i64, usize> = HashMap::new();

  for (comment, author) in comments {
    if comment.parent_id.is_none() {
      index.insert(comment.id, nodes.len());
      nodes.push(CommentNode {
        comment: CommentView::build(comment, author.clone()),
        replies: Vec::new(),
      });
    }
  }

  for (comment, author) in comments {
    if let Some(parent_id) = comment.parent_id
      && let Some(&slot) = index.get(&parent_id)
    {
      nodes[slot]
        .replies
        .push(CommentView::build(comment, author.clone()));
    }
  }

  nodes
}

/// The full post view: content, counters, author, tag names, comment tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  pub view_count: i64,
  pub like_count: i64,
  pub created_at: DateTime<Utc>,
  pub author:     Author,
  pub tags:       Vec<String>,
  pub comments:   Vec<CommentNode>,
}

impl PostDetail {
  pub fn build(
    post: Post,
    author: Author,
    tags: Vec<String>,
    comments: Vec<CommentNode>,
  ) -> Self {
    PostDetail {
      id:         post.id,
      title:      post.title,
      content:    post.content,
      view_count: post.view_count,
      like_count: post.like_count,
      created_at: post.created_at,
      author,
      tags,
      comments,
    }
  }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Pagination metadata. `current_page` is echoed back verbatim — requesting
/// page 99 of a 1-page set yields an empty item list with `current_page` 99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
  pub total_count:  u64,
  pub total_pages:  u64,
  pub current_page: u32,
}

impl PageInfo {
  pub fn new(total_count: u64, limit: u32, current_page: u32) -> Self {
    PageInfo {
      total_count,
      total_pages: total_count.div_ceil(limit.max(1) as u64),
      current_page,
    }
  }
}
