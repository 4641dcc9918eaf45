//! Login, logout, and the bearer-token request extractor.
//!
//! Passwords are argon2 PHC strings. Login issues an opaque token; only its
//! sha2 digest is stored, so a leaked database cannot replay sessions.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use quill_core::{store::BlogStore, user::User};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{AppState, ServerConfig, error::ApiError};

// ─── Passwords ───────────────────────────────────────────────────────────────

pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|_| ApiError::Hash)?
      .to_string(),
  )
}

pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

fn issue_token() -> String { Uuid::new_v4().simple().to_string() }

pub fn token_digest(token: &str) -> String {
  B64.encode(Sha256::digest(token.as_bytes()))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .ok_or(ApiError::Unauthorized)
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated caller, resolved from the `Authorization` header.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let digest = token_digest(bearer_token(&parts.headers)?);
    let user = state
      .store
      .session_user(digest)
      .await?
      .ok_or(ApiError::Unauthorized)?;
    Ok(CurrentUser(user))
  }
}

/// Admin status is a configured set of account emails, not a role column.
pub fn require_admin(config: &ServerConfig, user: &User) -> Result<(), ApiError> {
  if config.admin_emails.iter().any(|email| email == &user.email) {
    Ok(())
  } else {
    Err(ApiError::Forbidden("admin access required".to_owned()))
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
  pub access_token: String,
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user_by_email(body.email)
    .await?
    .filter(|user| verify_password(&body.password, &user.password_hash))
    .ok_or(ApiError::Unauthorized)?;

  let token = issue_token();
  state
    .store
    .create_session(user.id, token_digest(&token))
    .await?;

  Ok(Json(TokenResponse {
    access_token: token,
  }))
}

/// `POST /auth/logout` — revokes the presented token. Tokens that are already
/// unknown revoke to the same end state.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let digest = token_digest(bearer_token(&headers)?);
  state.store.delete_session(digest).await?;
  Ok(Json(serde_json::json!({ "message": "logged out" })))
}
