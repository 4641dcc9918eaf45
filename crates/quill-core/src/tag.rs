//! Tags — name-keyed, created on first use, linked to posts many-to-many.
//!
//! Tag rows are never deleted by normal flows; orphaned tags may persist.

use serde::{Deserialize, Serialize};

/// A tag row. `name` is unique, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub id:   i64,
  pub name: String,
}

/// A tag name with the number of live posts linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
  pub name:       String,
  pub post_count: u64,
}
