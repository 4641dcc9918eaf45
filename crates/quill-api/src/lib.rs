//! JSON REST boundary for the Quill blog backend.
//!
//! Exposes an axum [`Router`] backed by any [`BlogStore`]. The boundary owns
//! request/response shapes, auth, and ownership checks; all data access and
//! aggregation live below it in `quill-core`/`quill-store-sqlite`.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod error;
pub mod posts;
pub mod tags;
pub mod users;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use quill_core::store::BlogStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Accounts with admin access, by email.
  #[serde(default)]
  pub admin_emails: Vec<String>,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: BlogStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Auth
    .route("/auth/login", post(auth::login::<S>))
    .route("/auth/logout", post(auth::logout::<S>))
    // Users
    .route("/users/signup", post(users::signup::<S>))
    .route("/users/{id}", get(users::profile::<S>))
    .route("/users/{id}/posts", get(users::user_posts::<S>))
    .route("/me", get(users::me::<S>).patch(users::update_me::<S>))
    .route("/me/posts", get(posts::my_posts::<S>))
    // Posts
    .route("/posts", get(posts::list::<S>).post(posts::create::<S>))
    .route(
      "/posts/{id}",
      get(posts::detail::<S>)
        .patch(posts::update::<S>)
        .delete(posts::delete::<S>),
    )
    .route("/posts/{id}/like", post(posts::toggle_like::<S>))
    // Comments
    .route("/posts/{id}/comments", post(comments::create::<S>))
    .route(
      "/comments/{id}",
      axum::routing::patch(comments::update::<S>).delete(comments::delete::<S>),
    )
    // Tags
    .route("/tags", get(tags::list::<S>))
    // Announcements (public read, admin write)
    .route("/announcements", get(admin::announcements::<S>))
    // Admin
    .route("/admin/dashboard", get(admin::dashboard::<S>))
    .route("/admin/posts", get(admin::posts::<S>))
    .route("/admin/posts/{id}", delete(admin::delete_post::<S>))
    .route("/admin/comments/{id}", delete(admin::delete_comment::<S>))
    .route("/admin/announcements", post(admin::create_announcement::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use quill_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig {
        host:         "127.0.0.1".to_string(),
        port:         8080,
        store_path:   PathBuf::from(":memory:"),
        admin_emails: vec!["admin@example.com".to_string()],
      }),
    }
  }

  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
      Some(value) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// Sign up `handle@example.com` and return a fresh bearer token.
  async fn signup_and_login(state: &AppState<SqliteStore>, handle: &str) -> String {
    let resp = send(
      state.clone(),
      "POST",
      "/users/signup",
      None,
      Some(json!({
        "email": format!("{handle}@example.com"),
        "password": "hunter2",
        "nickname": handle,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(
      state.clone(),
      "POST",
      "/auth/login",
      None,
      Some(json!({
        "email": format!("{handle}@example.com"),
        "password": "hunter2",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["accessToken"]
      .as_str()
      .unwrap()
      .to_string()
  }

  async fn create_post(
    state: &AppState<SqliteStore>,
    token: &str,
    title: &str,
    tags: Value,
  ) -> i64 {
    let resp = send(
      state.clone(),
      "POST",
      "/posts",
      Some(token),
      Some(json!({ "title": title, "content": format!("{title} body"), "tags": tags })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
  }

  // ── Accounts ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn signup_conflicts_on_duplicate_email() {
    let state = make_state().await;
    signup_and_login(&state, "alice").await;

    let resp = send(
      state,
      "POST",
      "/users/signup",
      None,
      Some(json!({
        "email": "alice@example.com",
        "password": "pw",
        "nickname": "alice2",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn login_rejects_wrong_password() {
    let state = make_state().await;
    signup_and_login(&state, "alice").await;

    let resp = send(
      state,
      "POST",
      "/auth/login",
      None,
      Some(json!({ "email": "alice@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_requires_a_token() {
    let state = make_state().await;
    let resp = send(state, "GET", "/me", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn me_returns_the_caller() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;

    let resp = send(state, "GET", "/me", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["nickname"], "alice");
    assert_eq!(body["email"], "alice@example.com");
  }

  #[tokio::test]
  async fn logout_revokes_the_session() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;

    let resp = send(state.clone(), "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(state, "GET", "/me", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn update_me_changes_nickname() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;

    let resp = send(
      state,
      "PATCH",
      "/me",
      Some(&token),
      Some(json!({ "nickname": "alicia" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["nickname"], "alicia");
  }

  // ── Posts ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_create_and_detail_round_trip() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;
    let id = create_post(&state, &token, "hello", json!(["rust", "blog"])).await;

    let resp = send(state, "GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "hello");
    assert_eq!(body["tags"], json!(["rust", "blog"]));
    assert_eq!(body["author"]["nickname"], "alice");
    // The detail read itself bumped the counter.
    assert_eq!(body["viewCount"], 1);
  }

  #[tokio::test]
  async fn post_listing_carries_pagination_metadata() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;
    for i in 0..3 {
      create_post(&state, &token, &format!("post {i}"), json!([])).await;
    }

    let resp = send(state, "GET", "/posts?page=1&limit=2", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["currentPage"], 1);
    // Newest first.
    assert_eq!(body["posts"][0]["title"], "post 2");
  }

  #[tokio::test]
  async fn post_update_by_stranger_is_forbidden() {
    let state = make_state().await;
    let alice = signup_and_login(&state, "alice").await;
    let mallory = signup_and_login(&state, "mallory").await;
    let id = create_post(&state, &alice, "hers", json!([])).await;

    let resp = send(
      state,
      "PATCH",
      &format!("/posts/{id}"),
      Some(&mallory),
      Some(json!({ "title": "mine now" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn post_delete_then_detail_is_404() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;
    let id = create_post(&state, &token, "fleeting", json!([])).await;

    let resp = send(
      state.clone(),
      "DELETE",
      &format!("/posts/{id}"),
      Some(&token),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(state, "GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn like_toggles_on_and_off() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;
    let id = create_post(&state, &token, "likeable", json!([])).await;

    let resp = send(
      state.clone(),
      "POST",
      &format!("/posts/{id}/like"),
      Some(&token),
      None,
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["likeCount"], 1);
    assert_eq!(body["userLiked"], true);

    let resp = send(
      state,
      "POST",
      &format!("/posts/{id}/like"),
      Some(&token),
      None,
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["likeCount"], 0);
    assert_eq!(body["userLiked"], false);
  }

  // ── Comments ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn comment_tree_appears_in_post_detail() {
    let state = make_state().await;
    let alice = signup_and_login(&state, "alice").await;
    let bob = signup_and_login(&state, "bob").await;
    let id = create_post(&state, &alice, "discussed", json!([])).await;

    let resp = send(
      state.clone(),
      "POST",
      &format!("/posts/{id}/comments"),
      Some(&alice),
      Some(json!({ "content": "first!" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let parent_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = send(
      state.clone(),
      "POST",
      &format!("/posts/{id}/comments"),
      Some(&bob),
      Some(json!({ "content": "welcome", "parentCommentId": parent_id })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(state, "GET", &format!("/posts/{id}"), None, None).await;
    let body = body_json(resp).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "first!");
    let replies = comments[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["author"]["nickname"], "bob");
  }

  #[tokio::test]
  async fn comment_update_by_stranger_is_forbidden() {
    let state = make_state().await;
    let alice = signup_and_login(&state, "alice").await;
    let mallory = signup_and_login(&state, "mallory").await;
    let id = create_post(&state, &alice, "discussed", json!([])).await;

    let resp = send(
      state.clone(),
      "POST",
      &format!("/posts/{id}/comments"),
      Some(&alice),
      Some(json!({ "content": "hers" })),
    )
    .await;
    let comment_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = send(
      state,
      "PATCH",
      &format!("/comments/{comment_id}"),
      Some(&mallory),
      Some(json!({ "content": "defaced" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  // ── Tags ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn tag_index_reports_counts() {
    let state = make_state().await;
    let token = signup_and_login(&state, "alice").await;
    create_post(&state, &token, "one", json!(["rust"])).await;
    create_post(&state, &token, "two", json!(["rust", "blog"])).await;

    let resp = send(state, "GET", "/tags", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body[0]["name"], "rust");
    assert_eq!(body[0]["postCount"], 2);
  }

  // ── Admin ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_is_admin_only() {
    let state = make_state().await;
    let alice = signup_and_login(&state, "alice").await;
    let admin = signup_and_login(&state, "admin").await;

    let resp = send(state.clone(), "GET", "/admin/dashboard", Some(&alice), None).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(state, "GET", "/admin/dashboard", Some(&admin), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["totalUsers"], 2);
  }

  #[tokio::test]
  async fn admin_hard_delete_reaps_a_soft_deleted_post() {
    let state = make_state().await;
    let alice = signup_and_login(&state, "alice").await;
    let admin = signup_and_login(&state, "admin").await;
    let id = create_post(&state, &alice, "doomed", json!([])).await;

    // Owner soft delete first; the row survives for the admin.
    let resp = send(
      state.clone(),
      "DELETE",
      &format!("/posts/{id}"),
      Some(&alice),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(
      state.clone(),
      "DELETE",
      &format!("/admin/posts/{id}"),
      Some(&admin),
      Some(json!({ "deleteType": "hard" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone for good now.
    let resp = send(
      state,
      "DELETE",
      &format!("/admin/posts/{id}"),
      Some(&admin),
      Some(json!({ "deleteType": "hard" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn announcements_are_public_but_stay_out_of_the_feed() {
    let state = make_state().await;
    let admin = signup_and_login(&state, "admin").await;

    let resp = send(
      state.clone(),
      "POST",
      "/admin/announcements",
      Some(&admin),
      Some(json!({ "title": "maintenance", "content": "tonight at 22:00" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(state.clone(), "GET", "/announcements", None, None).await;
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "maintenance");

    let resp = send(state, "GET", "/posts", None, None).await;
    let body = body_json(resp).await;
    assert!(body["posts"].as_array().unwrap().is_empty());
  }
}
