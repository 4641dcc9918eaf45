//! The `BlogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `quill-store-sqlite`).
//! The boundary layer depends on this abstraction, not on any concrete
//! backend. Every write method executes as a single atomic transaction in
//! the backend: either all row mutations commit or none do.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  comment::{Comment, NewComment},
  post::{DeleteMode, LikeOutcome, NewPost, Post, PostPatch, PostSort},
  tag::TagCount,
  user::{Author, NewUser, User, UserPatch},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`BlogStore::list_posts`].
///
/// `total_count` in the result always reflects the filtered set, independent
/// of the pagination window. Filters that match nothing yield an empty page,
/// never an error.
#[derive(Debug, Clone)]
pub struct PostQuery {
  /// 1-indexed. The boundary clamps; the store floors at 1 rather than
  /// crashing on out-of-range values.
  pub page:      u32,
  pub limit:     u32,
  pub sort:      PostSort,
  /// Case-insensitive substring match against title OR content.
  pub text:      Option<String>,
  /// Restrict to posts linked to this exact tag name.
  pub tag:       Option<String>,
  pub author_id: Option<i64>,
  /// Selects the announcement population instead of the regular feed.
  pub notice:    bool,
}

impl Default for PostQuery {
  fn default() -> Self {
    PostQuery {
      page:      1,
      limit:     10,
      sort:      PostSort::Latest,
      text:      None,
      tag:       None,
      author_id: None,
      notice:    false,
    }
  }
}

/// Aggregate counters for the admin dashboard. Post counts exclude
/// soft-deleted rows; "today" is the store's current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
  pub total_users:    u64,
  pub today_signups:  u64,
  pub total_posts:    u64,
  pub today_posts:    u64,
  pub total_comments: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Quill storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BlogStore: Send + Sync {
  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert a new user. Uniqueness races on email/nickname surface as
  /// [`EmailTaken`](crate::Error::EmailTaken) /
  /// [`NicknameTaken`](crate::Error::NicknameTaken) — insert-then-detect,
  /// not check-then-insert.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;

  fn get_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;

  fn get_user_by_nickname(
    &self,
    nickname: String,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;

  /// Partial update; omitted fields are left unchanged.
  fn update_user(
    &self,
    id: i64,
    patch: UserPatch,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Persist a digest of an issued bearer token. The plaintext token never
  /// reaches the store.
  fn create_session(
    &self,
    user_id: i64,
    token_hash: String,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Resolve a token digest to its user, or `None` for unknown/revoked
  /// tokens.
  fn session_user(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;

  /// Revoke a session. Revoking an unknown token is a no-op.
  fn delete_session(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Insert a post with its tag links in one transaction. Tag names are
  /// created on first use; duplicate names in the input collapse to one
  /// link.
  fn create_post(
    &self,
    author_id: i64,
    input: NewPost,
  ) -> impl Future<Output = Result<Post>> + Send + '_;

  /// Fetch a live post with its author. Soft-deleted rows read as `None`.
  ///
  /// With `increment_view`, the view counter is bumped in place as part of
  /// the same operation — concurrent readers must not lose increments.
  fn get_post(
    &self,
    id: i64,
    increment_view: bool,
  ) -> impl Future<Output = Result<Option<(Post, Author)>>> + Send + '_;

  /// Paginated, sorted, filtered listing over live posts. Returns the page
  /// of rows plus the total count of the filtered set.
  fn list_posts(
    &self,
    query: PostQuery,
  ) -> impl Future<Output = Result<(Vec<(Post, Author)>, u64)>> + Send + '_;

  /// Partial update. When `tags` is provided (even empty), the full tag
  /// link set is replaced. [`PostNotFound`](crate::Error::PostNotFound) if
  /// the post is absent or soft-deleted.
  fn update_post(
    &self,
    id: i64,
    patch: PostPatch,
  ) -> impl Future<Output = Result<Post>> + Send + '_;

  /// Soft delete marks a live row; hard delete removes any existing row —
  /// including one already soft-deleted — and cascades its comments, likes,
  /// and tag links.
  fn delete_post(
    &self,
    id: i64,
    mode: DeleteMode,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Flip the (user, post) like membership and keep `like_count` in sync,
  /// in one transaction. Repeated calls strictly alternate state; this is
  /// NOT retry-idempotent.
  fn toggle_like(
    &self,
    post_id: i64,
    user_id: i64,
  ) -> impl Future<Output = Result<LikeOutcome>> + Send + '_;

  /// Names of the tags linked to a post, in link insertion order.
  fn post_tags(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + '_;

  fn comment_count(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<u64>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Insert a comment. The post must be live; a parent, when given, must be
  /// a comment on the same post.
  fn create_comment(
    &self,
    post_id: i64,
    author_id: i64,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment>> + Send + '_;

  fn get_comment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<(Comment, Author)>>> + Send + '_;

  /// Replace the content. Ownership is the caller's check — this layer
  /// trusts it.
  fn update_comment(
    &self,
    id: i64,
    content: String,
  ) -> impl Future<Output = Result<Comment>> + Send + '_;

  /// Hard delete. Replies to the deleted comment are left orphaned.
  fn delete_comment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// All comments on a post with their authors, `created_at` ascending
  /// (ties by id).
  fn list_post_comments(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<Vec<(Comment, Author)>>> + Send + '_;

  // ── Tags ──────────────────────────────────────────────────────────────

  /// Every tag with its live-post link count, post_count descending then
  /// name ascending.
  fn list_tags(
    &self,
  ) -> impl Future<Output = Result<Vec<TagCount>>> + Send + '_;

  // ── Admin ─────────────────────────────────────────────────────────────

  fn dashboard_stats(
    &self,
  ) -> impl Future<Output = Result<DashboardStats>> + Send + '_;
}
