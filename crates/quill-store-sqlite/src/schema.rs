//! SQL schema for the Quill SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    nickname      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at    TEXT NOT NULL
);

-- Bearer tokens are stored as digests only; the plaintext never lands here.
CREATE TABLE IF NOT EXISTS sessions (
    token_hash TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    title      TEXT NOT NULL,
    content    TEXT NOT NULL,
    view_count INTEGER NOT NULL DEFAULT 0,
    like_count INTEGER NOT NULL DEFAULT 0,
    is_notice  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT                -- soft delete marker; NULL = live
);

-- parent_comment_id deliberately carries no foreign key: deleting a parent
-- comment is permitted and leaves its replies orphaned.
CREATE TABLE IF NOT EXISTS comments (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id           INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id           INTEGER NOT NULL REFERENCES users(id),
    parent_comment_id INTEGER,
    content           TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

-- Tag rows are never deleted by normal flows; orphans may persist.
CREATE TABLE IF NOT EXISTS tags (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS post_tags (
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    tag_id  INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (post_id, tag_id)
);

CREATE TABLE IF NOT EXISTS post_likes (
    user_id    INTEGER NOT NULL REFERENCES users(id),
    post_id    INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, post_id)
);

CREATE INDEX IF NOT EXISTS posts_user_idx      ON posts(user_id);
CREATE INDEX IF NOT EXISTS posts_created_idx   ON posts(created_at);
CREATE INDEX IF NOT EXISTS posts_deleted_idx   ON posts(deleted_at);
CREATE INDEX IF NOT EXISTS comments_post_idx   ON comments(post_id);
CREATE INDEX IF NOT EXISTS comments_user_idx   ON comments(user_id);
CREATE INDEX IF NOT EXISTS comments_parent_idx ON comments(parent_comment_id);
CREATE INDEX IF NOT EXISTS sessions_user_idx   ON sessions(user_id);

PRAGMA user_version = 1;
";
