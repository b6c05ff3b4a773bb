//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (authentication, users, departments,
//! subjects, exams, sheets, grievances, dashboard), each protected via
//! appropriate access control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (login, public)
//! - `/users`, `/departments`, `/subjects` → Admin-managed reference data
//! - `/exams` → Exam creation, teacher assignments, sheet uploads
//! - `/sheets` → Sheet detail, grading, annotations, grievance submission
//! - `/grievances` → Grievance review transitions (teachers)
//! - `/me` → Role-filtered views for the calling user
//! - `/dashboard` → Admin overview statistics

use crate::auth::guards::{allow_admin, allow_authenticated, allow_teacher};
use crate::routes::{
    auth::auth_routes, dashboard::dashboard_routes, departments::departments_routes,
    exams::exams_routes, grievances::grievances_routes, health::health_routes, me::me_routes,
    sheets::sheets_routes, subjects::subjects_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod common;
pub mod dashboard;
pub mod departments;
pub mod exams;
pub mod grievances;
pub mod health;
pub mod me;
pub mod sheets;
pub mod subjects;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has its state applied and mounts all core API routes
/// under their respective base paths.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Login (no authentication required).
/// - `/users`, `/departments`, `/subjects` → Reference data (admin only).
/// - `/exams` → Exam CRUD and nested assignments/sheets (authenticated;
///   per-route guards tighten access further).
/// - `/sheets` → Sheet detail, grading, annotations, and grievance
///   submission (authenticated; per-route guards).
/// - `/grievances` → Review transitions (teachers).
/// - `/me` → The calling user's sheets, grievances, and pending queue.
/// - `/dashboard` → Overview statistics (admin only).
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/departments",
            departments_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/subjects",
            subjects_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/exams",
            exams_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/sheets",
            sheets_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/grievances",
            grievances_routes().route_layer(from_fn(allow_teacher)),
        )
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .nest(
            "/dashboard",
            dashboard_routes().route_layer(from_fn(allow_admin)),
        )
        .with_state(app_state)
}
