//! [`SqliteStore`] — the SQLite implementation of [`BlogStore`].

use std::path::Path;

use chrono::Utc;
use quill_core::{
  Error, Result,
  comment::{Comment, NewComment},
  post::{DeleteMode, LikeOutcome, NewPost, Post, PostPatch, PostSort},
  store::{BlogStore, DashboardStats, PostQuery},
  tag::TagCount,
  user::{Author, NewUser, User, UserPatch},
};
use rusqlite::OptionalExtension as _;

use crate::{
  encode::{RawComment, RawPost, RawUser, encode_dt},
  schema::SCHEMA,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn db_err(err: tokio_rusqlite::Error) -> Error { Error::storage(err) }

/// The `"users.email"`-style target of a UNIQUE violation, if that is what
/// this error is.
fn unique_target(err: &tokio_rusqlite::Error) -> Option<&str> {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    code,
    Some(msg),
  )) = err
    && code.code == rusqlite::ErrorCode::ConstraintViolation
  {
    msg.strip_prefix("UNIQUE constraint failed: ")
  } else {
    None
  }
}

/// Get-or-create each tag by exact name and link it to the post.
///
/// Insert-then-select closes the get-or-create race window structurally;
/// duplicate names in the input collapse to one link via the composite
/// primary key on `post_tags`.
fn link_tags(
  conn: &rusqlite::Connection,
  post_id: i64,
  names: &[String],
) -> rusqlite::Result<()> {
  for name in names {
    conn.execute(
      "INSERT INTO tags (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
      rusqlite::params![name],
    )?;
    let tag_id: i64 = conn.query_row(
      "SELECT id FROM tags WHERE name = ?1",
      rusqlite::params![name],
      |row| row.get(0),
    )?;
    conn.execute(
      "INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?1, ?2)",
      rusqlite::params![post_id, tag_id],
    )?;
  }
  Ok(())
}

/// Fetch a post row (live or not) joined with its author's nickname.
fn fetch_post(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawPost>> {
  conn
    .query_row(
      &format!(
        "SELECT {} FROM posts p JOIN users u ON u.id = p.user_id
         WHERE p.id = ?1",
        RawPost::COLUMNS
      ),
      rusqlite::params![id],
      RawPost::from_row,
    )
    .optional()
}

fn fetch_comment(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawComment>> {
  conn
    .query_row(
      &format!(
        "SELECT {} FROM comments c JOIN users u ON u.id = c.user_id
         WHERE c.id = ?1",
        RawComment::COLUMNS
      ),
      rusqlite::params![id],
      RawComment::from_row,
    )
    .optional()
}

/// True when the post exists and is not soft-deleted.
fn post_is_live(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<bool> {
  let row: Option<i64> = conn
    .query_row(
      "SELECT id FROM posts WHERE id = ?1 AND deleted_at IS NULL",
      rusqlite::params![id],
      |row| row.get(0),
    )
    .optional()?;
  Ok(row.is_some())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quill blog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// run as one transaction on a single connection, which gives each logical
/// operation the atomicity the counters rely on.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }
}

// ─── BlogStore impl ──────────────────────────────────────────────────────────

impl BlogStore for SqliteStore {
  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let now = encode_dt(Utc::now());

    let res = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (email, nickname, password_hash, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![input.email, input.nickname, input.password_hash, now],
        )?;
        let id = conn.last_insert_rowid();
        let raw = conn.query_row(
          &format!("SELECT {} FROM users u WHERE u.id = ?1", RawUser::COLUMNS),
          rusqlite::params![id],
          RawUser::from_row,
        )?;
        Ok(raw)
      })
      .await;

    match res {
      Ok(raw) => raw.into_user(),
      Err(err) => match unique_target(&err) {
        Some("users.email") => Err(Error::EmailTaken),
        Some("users.nickname") => Err(Error::NicknameTaken),
        _ => Err(db_err(err)),
      },
    }
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM users u WHERE u.id = ?1", RawUser::COLUMNS),
              rusqlite::params![id],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email(&self, email: String) -> Result<Option<User>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM users u WHERE u.email = ?1", RawUser::COLUMNS),
              rusqlite::params![email],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_nickname(&self, nickname: String) -> Result<Option<User>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM users u WHERE u.nickname = ?1", RawUser::COLUMNS),
              rusqlite::params![nickname],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User> {
    let now = encode_dt(Utc::now());

    let res = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {} FROM users u WHERE u.id = ?1", RawUser::COLUMNS),
            rusqlite::params![id],
            RawUser::from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(Err(Error::UserNotFound(id)));
        };

        let nickname = patch.nickname.unwrap_or(raw.nickname);
        let password_hash = patch.password_hash.unwrap_or(raw.password_hash);
        tx.execute(
          "UPDATE users SET nickname = ?1, password_hash = ?2, updated_at = ?3
           WHERE id = ?4",
          rusqlite::params![nickname, password_hash, now, id],
        )?;

        let raw = tx.query_row(
          &format!("SELECT {} FROM users u WHERE u.id = ?1", RawUser::COLUMNS),
          rusqlite::params![id],
          RawUser::from_row,
        )?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await;

    match res {
      Ok(inner) => inner.and_then(RawUser::into_user),
      Err(err) => match unique_target(&err) {
        Some("users.nickname") => Err(Error::NicknameTaken),
        _ => Err(db_err(err)),
      },
    }
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn create_session(&self, user_id: i64, token_hash: String) -> Result<()> {
    let now = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token_hash, user_id, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![token_hash, user_id, now],
        )?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  async fn session_user(&self, token_hash: String) -> Result<Option<User>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM users u
                 JOIN sessions s ON s.user_id = u.id
                 WHERE s.token_hash = ?1",
                RawUser::COLUMNS
              ),
              rusqlite::params![token_hash],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn delete_session(&self, token_hash: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM sessions WHERE token_hash = ?1",
          rusqlite::params![token_hash],
        )?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn create_post(&self, author_id: i64, input: NewPost) -> Result<Post> {
    input.validate()?;
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO posts (user_id, title, content, is_notice, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![author_id, input.title, input.content, input.is_notice, now],
        )?;
        let post_id = tx.last_insert_rowid();
        link_tags(&tx, post_id, &input.tags)?;
        let raw = fetch_post(&tx, post_id)?
          .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(raw)
      })
      .await
      .map_err(db_err)?
      .into_post()
  }

  async fn get_post(
    &self,
    id: i64,
    increment_view: bool,
  ) -> Result<Option<(Post, Author)>> {
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if increment_view {
          // In-place increment: concurrent readers cannot lose updates.
          tx.execute(
            "UPDATE posts SET view_count = view_count + 1
             WHERE id = ?1 AND deleted_at IS NULL",
            rusqlite::params![id],
          )?;
        }
        let raw = tx
          .query_row(
            &format!(
              "SELECT {} FROM posts p JOIN users u ON u.id = p.user_id
               WHERE p.id = ?1 AND p.deleted_at IS NULL",
              RawPost::COLUMNS
            ),
            rusqlite::params![id],
            RawPost::from_row,
          )
          .optional()?;
        tx.commit()?;
        Ok(raw)
      })
      .await
      .map_err(db_err)?;

    raw.map(RawPost::into_pair).transpose()
  }

  async fn list_posts(
    &self,
    query: PostQuery,
  ) -> Result<(Vec<(Post, Author)>, u64)> {
    // Out-of-range paging values are floored, never an error.
    let page = query.page.max(1);
    let limit = i64::from(query.limit.max(1));
    let offset = i64::from(page - 1) * limit;

    let text_pattern = query.text.as_deref().map(|t| format!("%{t}%"));
    let tag = query.tag;
    let author_id = query.author_id;
    let notice = query.notice;
    let order = match query.sort {
      PostSort::Latest => "p.created_at DESC, p.id ASC",
      PostSort::Popular => "p.like_count DESC, p.id ASC",
    };

    let (raws, total) = self
      .conn
      .call(move |conn| {
        // Build the WHERE clause dynamically; bind values in step.
        let mut conds: Vec<&'static str> =
          vec!["p.deleted_at IS NULL", "p.is_notice = ?"];
        let mut binds: Vec<rusqlite::types::Value> = vec![notice.into()];

        if let Some(pattern) = text_pattern {
          conds.push("(p.title LIKE ? OR p.content LIKE ?)");
          binds.push(pattern.clone().into());
          binds.push(pattern.into());
        }
        if let Some(tag) = tag {
          conds.push(
            "p.id IN (SELECT pt.post_id FROM post_tags pt
                      JOIN tags t ON t.id = pt.tag_id WHERE t.name = ?)",
          );
          binds.push(tag.into());
        }
        if let Some(author_id) = author_id {
          conds.push("p.user_id = ?");
          binds.push(author_id.into());
        }
        let where_clause = conds.join(" AND ");

        // The total reflects the filtered set, not the page window.
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM posts p WHERE {where_clause}"),
          rusqlite::params_from_iter(binds.iter()),
          |row| row.get(0),
        )?;

        binds.push(limit.into());
        binds.push(offset.into());
        let sql = format!(
          "SELECT {} FROM posts p JOIN users u ON u.id = p.user_id
           WHERE {where_clause} ORDER BY {order} LIMIT ? OFFSET ?",
          RawPost::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(rusqlite::params_from_iter(binds.iter()), RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((raws, total))
      })
      .await
      .map_err(db_err)?;

    let posts = raws
      .into_iter()
      .map(RawPost::into_pair)
      .collect::<Result<Vec<_>>>()?;
    Ok((posts, total as u64))
  }

  async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post> {
    patch.validate()?;
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(
            "SELECT title, content FROM posts
             WHERE id = ?1 AND deleted_at IS NULL",
            rusqlite::params![id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
          )
          .optional()?;
        let Some((cur_title, cur_content)) = current else {
          return Ok(Err(Error::PostNotFound(id)));
        };

        let title = patch.title.unwrap_or(cur_title);
        let content = patch.content.unwrap_or(cur_content);
        tx.execute(
          "UPDATE posts SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
          rusqlite::params![title, content, now, id],
        )?;

        // tags = Some(_) replaces the full link set, even when empty.
        if let Some(tags) = &patch.tags {
          tx.execute(
            "DELETE FROM post_tags WHERE post_id = ?1",
            rusqlite::params![id],
          )?;
          link_tags(&tx, id, tags)?;
        }

        let raw =
          fetch_post(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await
      .map_err(db_err)?
      .and_then(RawPost::into_post)
  }

  async fn delete_post(&self, id: i64, mode: DeleteMode) -> Result<()> {
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let changed = match mode {
          DeleteMode::Soft => conn.execute(
            "UPDATE posts SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            rusqlite::params![now, id],
          )?,
          // Hard delete also reaps rows already soft-deleted; comments,
          // likes, and tag links cascade.
          DeleteMode::Hard => {
            conn.execute("DELETE FROM posts WHERE id = ?1", rusqlite::params![id])?
          }
        };
        if changed == 0 {
          return Ok(Err(Error::PostNotFound(id)));
        }
        Ok(Ok(()))
      })
      .await
      .map_err(db_err)?
  }

  async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeOutcome> {
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !post_is_live(&tx, post_id)? {
          return Ok(Err(Error::PostNotFound(post_id)));
        }

        // Delete-first: a removed row means this call is an unlike.
        let removed = tx.execute(
          "DELETE FROM post_likes WHERE user_id = ?1 AND post_id = ?2",
          rusqlite::params![user_id, post_id],
        )?;
        let liked = if removed > 0 {
          tx.execute(
            "UPDATE posts SET like_count = MAX(like_count - 1, 0) WHERE id = ?1",
            rusqlite::params![post_id],
          )?;
          false
        } else {
          // An ignored insert means a concurrent request got there first;
          // that is "already liked", not an error, and the counter stays.
          let inserted = tx.execute(
            "INSERT OR IGNORE INTO post_likes (user_id, post_id, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, post_id, now],
          )?;
          if inserted > 0 {
            tx.execute(
              "UPDATE posts SET like_count = like_count + 1 WHERE id = ?1",
              rusqlite::params![post_id],
            )?;
          }
          true
        };

        let like_count: i64 = tx.query_row(
          "SELECT like_count FROM posts WHERE id = ?1",
          rusqlite::params![post_id],
          |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(Ok(LikeOutcome { like_count, liked }))
      })
      .await
      .map_err(db_err)?
  }

  async fn post_tags(&self, post_id: i64) -> Result<Vec<String>> {
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT t.name FROM post_tags pt JOIN tags t ON t.id = pt.tag_id
           WHERE pt.post_id = ?1 ORDER BY pt.rowid",
        )?;
        let names = stmt
          .query_map(rusqlite::params![post_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await
      .map_err(db_err)
  }

  async fn comment_count(&self, post_id: i64) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM comments WHERE post_id = ?1",
          rusqlite::params![post_id],
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(db_err)?;
    Ok(count as u64)
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn create_comment(
    &self,
    post_id: i64,
    author_id: i64,
    input: NewComment,
  ) -> Result<Comment> {
    input.validate()?;
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !post_is_live(&tx, post_id)? {
          return Ok(Err(Error::PostNotFound(post_id)));
        }
        if let Some(parent_id) = input.parent_id {
          let parent_post: Option<i64> = tx
            .query_row(
              "SELECT post_id FROM comments WHERE id = ?1",
              rusqlite::params![parent_id],
              |row| row.get(0),
            )
            .optional()?;
          if parent_post != Some(post_id) {
            return Ok(Err(Error::ParentCommentNotFound(parent_id)));
          }
        }

        tx.execute(
          "INSERT INTO comments (post_id, user_id, parent_comment_id, content, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![post_id, author_id, input.parent_id, input.content, now],
        )?;
        let id = tx.last_insert_rowid();
        let raw =
          fetch_comment(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await
      .map_err(db_err)?
      .and_then(RawComment::into_comment)
  }

  async fn get_comment(&self, id: i64) -> Result<Option<(Comment, Author)>> {
    let raw = self
      .conn
      .call(move |conn| Ok(fetch_comment(conn, id)?))
      .await
      .map_err(db_err)?;

    raw.map(RawComment::into_pair).transpose()
  }

  async fn update_comment(&self, id: i64, content: String) -> Result<Comment> {
    if content.trim().is_empty() {
      return Err(Error::EmptyField("content"));
    }
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE comments SET content = ?1, updated_at = ?2 WHERE id = ?3",
          rusqlite::params![content, now, id],
        )?;
        if changed == 0 {
          return Ok(Err(Error::CommentNotFound(id)));
        }
        let raw =
          fetch_comment(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await
      .map_err(db_err)?
      .and_then(RawComment::into_comment)
  }

  async fn delete_comment(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let changed =
          conn.execute("DELETE FROM comments WHERE id = ?1", rusqlite::params![id])?;
        if changed == 0 {
          return Ok(Err(Error::CommentNotFound(id)));
        }
        Ok(Ok(()))
      })
      .await
      .map_err(db_err)?
  }

  async fn list_post_comments(
    &self,
    post_id: i64,
  ) -> Result<Vec<(Comment, Author)>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM comments c JOIN users u ON u.id = c.user_id
           WHERE c.post_id = ?1 ORDER BY c.created_at ASC, c.id ASC",
          RawComment::COLUMNS
        ))?;
        let raws = stmt
          .query_map(rusqlite::params![post_id], RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(raws)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawComment::into_pair).collect()
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  async fn list_tags(&self) -> Result<Vec<TagCount>> {
    let rows = self
      .conn
      .call(|conn| {
        // COUNT(p.id) skips the NULLs the outer joins produce, so only
        // links to live posts are counted.
        let mut stmt = conn.prepare(
          "SELECT t.name, COUNT(p.id) AS post_count
           FROM tags t
           LEFT JOIN post_tags pt ON pt.tag_id = t.id
           LEFT JOIN posts p ON p.id = pt.post_id AND p.deleted_at IS NULL
           GROUP BY t.id, t.name
           ORDER BY post_count DESC, t.name ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    Ok(
      rows
        .into_iter()
        .map(|(name, post_count)| TagCount {
          name,
          post_count: post_count as u64,
        })
        .collect(),
    )
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  async fn dashboard_stats(&self) -> Result<DashboardStats> {
    let (total_users, today_signups, total_posts, today_posts, total_comments) =
      self
        .conn
        .call(|conn| {
          let count = |sql: &str| -> rusqlite::Result<i64> {
            conn.query_row(sql, [], |row| row.get(0))
          };
          Ok((
            count("SELECT COUNT(*) FROM users")?,
            count(
              "SELECT COUNT(*) FROM users WHERE date(created_at) = date('now')",
            )?,
            count("SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL")?,
            count(
              "SELECT COUNT(*) FROM posts
               WHERE deleted_at IS NULL AND date(created_at) = date('now')",
            )?,
            count("SELECT COUNT(*) FROM comments")?,
          ))
        })
        .await
        .map_err(db_err)?;

    Ok(DashboardStats {
      total_users:    total_users as u64,
      today_signups:  today_signups as u64,
      total_posts:    total_posts as u64,
      today_posts:    today_posts as u64,
      total_comments: total_comments as u64,
    })
  }
}
