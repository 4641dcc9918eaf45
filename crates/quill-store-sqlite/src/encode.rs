//! Decoding helpers between SQLite rows and the `quill-core` domain types.
//!
//! All timestamps are stored as RFC 3339 strings. Ids are plain SQLite
//! integers.

use chrono::{DateTime, Utc};
use quill_core::{
  Error, Result,
  comment::Comment,
  post::Post,
  user::{Author, User},
};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(Error::storage)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:            i64,
  pub email:         String,
  pub nickname:      String,
  pub password_hash: String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawUser {
  /// Requires the `users` table to be aliased as `u` so joined queries stay
  /// unambiguous.
  pub const COLUMNS: &'static str =
    "u.id, u.email, u.nickname, u.password_hash, u.created_at, u.updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawUser {
      id:            row.get(0)?,
      email:         row.get(1)?,
      nickname:      row.get(2)?,
      password_hash: row.get(3)?,
      created_at:    row.get(4)?,
      updated_at:    row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      email:         self.email,
      nickname:      self.nickname,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values from a `posts` row joined with the author's nickname.
pub struct RawPost {
  pub id:              i64,
  pub user_id:         i64,
  pub title:           String,
  pub content:         String,
  pub view_count:      i64,
  pub like_count:      i64,
  pub is_notice:       bool,
  pub created_at:      String,
  pub updated_at:      String,
  pub deleted_at:      Option<String>,
  pub author_nickname: String,
}

impl RawPost {
  /// Column list matching [`RawPost::from_row`]; requires the query to join
  /// `users u ON u.id = p.user_id`.
  pub const COLUMNS: &'static str =
    "p.id, p.user_id, p.title, p.content, p.view_count, p.like_count, \
     p.is_notice, p.created_at, p.updated_at, p.deleted_at, u.nickname";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPost {
      id:              row.get(0)?,
      user_id:         row.get(1)?,
      title:           row.get(2)?,
      content:         row.get(3)?,
      view_count:      row.get(4)?,
      like_count:      row.get(5)?,
      is_notice:       row.get(6)?,
      created_at:      row.get(7)?,
      updated_at:      row.get(8)?,
      deleted_at:      row.get(9)?,
      author_nickname: row.get(10)?,
    })
  }

  pub fn into_pair(self) -> Result<(Post, Author)> {
    let author = Author {
      id:       self.user_id,
      nickname: self.author_nickname,
    };
    let post = Post {
      id:         self.id,
      author_id:  self.user_id,
      title:      self.title,
      content:    self.content,
      view_count: self.view_count,
      like_count: self.like_count,
      is_notice:  self.is_notice,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      deleted_at: self
        .deleted_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    };
    Ok((post, author))
  }

  pub fn into_post(self) -> Result<Post> {
    Ok(self.into_pair()?.0)
  }
}

/// Raw values from a `comments` row joined with the author's nickname.
pub struct RawComment {
  pub id:              i64,
  pub post_id:         i64,
  pub user_id:         i64,
  pub parent_id:       Option<i64>,
  pub content:         String,
  pub created_at:      String,
  pub updated_at:      String,
  pub author_nickname: String,
}

impl RawComment {
  /// Requires the query to join `users u ON u.id = c.user_id`.
  pub const COLUMNS: &'static str =
    "c.id, c.post_id, c.user_id, c.parent_comment_id, c.content, \
     c.created_at, c.updated_at, u.nickname";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawComment {
      id:              row.get(0)?,
      post_id:         row.get(1)?,
      user_id:         row.get(2)?,
      parent_id:       row.get(3)?,
      content:         row.get(4)?,
      created_at:      row.get(5)?,
      updated_at:      row.get(6)?,
      author_nickname: row.get(7)?,
    })
  }

  pub fn into_pair(self) -> Result<(Comment, Author)> {
    let author = Author {
      id:       self.user_id,
      nickname: self.author_nickname,
    };
    let comment = Comment {
      id:         self.id,
      post_id:    self.post_id,
      author_id:  self.user_id,
      parent_id:  self.parent_id,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    };
    Ok((comment, author))
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(self.into_pair()?.0)
  }
}
