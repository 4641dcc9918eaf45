//! Error taxonomy for `quill-core`.
//!
//! The repository layer is not authorization-aware: ownership failures are
//! raised by the boundary using data from this crate, never from here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("post not found: {0}")]
  PostNotFound(i64),

  #[error("comment not found: {0}")]
  CommentNotFound(i64),

  /// The referenced parent comment is absent or belongs to another post.
  #[error("parent comment not found on this post: {0}")]
  ParentCommentNotFound(i64),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("email is already in use")]
  EmailTaken,

  #[error("nickname is already in use")]
  NicknameTaken,

  /// Unexpected backend failure. Never retried at this layer; the caller
  /// decides retry policy.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
