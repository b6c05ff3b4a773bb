//! Shared helpers for route handlers.

use axum::{Json, http::StatusCode};
use db::error::DomainError;
use serde::Serialize;

use crate::response::ApiResponse;

/// Maps a [`DomainError`] onto an HTTP status and the standard error
/// envelope.
///
/// Business invariant violations surface with their own message; transient
/// store failures are logged and reported as a generic retryable failure so
/// internals never leak to the client.
pub fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = match &err {
        DomainError::InvalidMarks { .. }
        | DomainError::InvalidAssignment(_)
        | DomainError::StaleMarks { .. } => StatusCode::BAD_REQUEST,

        DomainError::UnauthorizedReviewer { .. } | DomainError::NotSheetOwner => {
            StatusCode::FORBIDDEN
        }

        DomainError::NotFound(_) | DomainError::MarkNotFound { .. } => StatusCode::NOT_FOUND,

        DomainError::InvalidTransition { .. }
        | DomainError::AlreadyGraded { .. }
        | DomainError::Overlap { .. }
        | DomainError::SheetNotGraded
        | DomainError::DuplicateGrievance => StatusCode::CONFLICT,

        DomainError::Db(e) => {
            tracing::error!(error = %e, "Database error while handling request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Something went wrong, please try again")),
            );
        }
    };

    (status, Json(ApiResponse::error(err.to_string())))
}
