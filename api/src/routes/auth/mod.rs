//! Authentication routes module.
//!
//! Provides the `/auth` route group. Login is the only entry point: accounts
//! are provisioned by admins, so there is no self-service registration.

use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::login;

/// Builds and returns the `/auth` route group.
///
/// Routes:
/// - `POST /auth/login` → Verify credentials and issue a JWT
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
