//! User management routes module (admin only).

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use get::get_users;
use post::create_user;

/// Builds and returns the `/users` route group.
///
/// Routes:
/// - `POST /users` → Create a user with an explicit role
/// - `GET  /users` → List users, optionally filtered by role
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/", get(get_users))
}
