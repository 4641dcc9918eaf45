//! User accounts — the identity rows that own posts, comments, and likes.
//!
//! Password hashing is delegated to the boundary; the store only ever sees
//! the finished PHC string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. `email` and `nickname` are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:            i64,
  pub email:         String,
  pub nickname:      String,
  /// Argon2 PHC string, e.g. `$argon2id$v=19$…`. Plaintext never reaches
  /// this type.
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Input for [`BlogStore::create_user`](crate::store::BlogStore::create_user).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub nickname:      String,
  pub password_hash: String,
}

/// Partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
  pub nickname:      Option<String>,
  pub password_hash: Option<String>,
}

/// The public projection of a user, embedded in post and comment views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub id:       i64,
  pub nickname: String,
}

impl From<&User> for Author {
  fn from(user: &User) -> Self {
    Author {
      id:       user.id,
      nickname: user.nickname.clone(),
    }
  }
}
