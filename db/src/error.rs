//! Domain error taxonomy for the grading and grievance workflow.
//!
//! Every variant except [`DomainError::Db`] represents a business invariant
//! violation that is surfaced to the caller as a rejected operation; none of
//! them are retried. `Db` wraps transient store failures and is reported as a
//! generic failure instead.

use sea_orm::DbErr;
use thiserror::Error;

use crate::models::grievance::GrievanceStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("obtained marks must be between 0 and {max}, got {got}")]
    InvalidMarks { got: i64, max: i64 },

    #[error("no mark recorded for question {question_number} on answer sheet {sheet_id}")]
    MarkNotFound { sheet_id: i64, question_number: i64 },

    #[error("grievance in status '{from}' does not permit this transition")]
    InvalidTransition { from: GrievanceStatus },

    #[error("reviewer {reviewer_id} is not assigned to this question")]
    UnauthorizedReviewer { reviewer_id: i64 },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("answer sheet {sheet_id} has already been graded by another teacher")]
    AlreadyGraded { sheet_id: i64 },

    #[error("question {question_number} is already assigned to teacher {teacher_id} on this exam")]
    Overlap {
        question_number: i64,
        teacher_id: i64,
    },

    #[error("answer sheet has not been graded yet")]
    SheetNotGraded,

    #[error("answer sheet belongs to a different student")]
    NotSheetOwner,

    #[error("an open grievance already exists for this question")]
    DuplicateGrievance,

    #[error("claimed current marks ({claimed}) do not match the recorded marks ({actual})")]
    StaleMarks { claimed: i64, actual: i64 },

    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}
