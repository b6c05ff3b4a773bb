//! Read-only, role-parameterized projections over the grading aggregates.
//!
//! Nothing here mutates state; the dashboards re-query rather than cache, so
//! these functions are safe to call concurrently with grading and grievance
//! transitions.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::error::DomainError;
use crate::models::{
    answer_sheet::{self, GradingStatus, Model as SheetModel},
    department, exam,
    exam_teacher_assignment::Model as AssignmentModel,
    grievance::{self, GrievanceStatus, Model as GrievanceModel},
    subject,
    user::Role,
};

/// Answer sheets still waiting to be graded on exams the teacher is assigned
/// to — the teacher's work queue.
pub async fn pending_papers_for(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Vec<SheetModel>, DomainError> {
    let assignments = AssignmentModel::find_for_teacher(db, teacher_id).await?;
    if assignments.is_empty() {
        return Ok(vec![]);
    }

    let exam_ids: Vec<i64> = assignments.iter().map(|a| a.exam_id).collect();

    Ok(answer_sheet::Entity::find()
        .filter(answer_sheet::Column::ExamId.is_in(exam_ids))
        .filter(answer_sheet::Column::GradingStatus.eq(GradingStatus::Pending))
        .order_by_asc(answer_sheet::Column::UploadDate)
        .all(db)
        .await?)
}

/// Grievances visible to a user, filtered by role:
/// students see their own, teachers see those on exams they are assigned to,
/// admins see everything. Newest first.
pub async fn grievances_for(
    db: &DatabaseConnection,
    user_id: i64,
    role: Role,
) -> Result<Vec<GrievanceModel>, DomainError> {
    let base = grievance::Entity::find().order_by_desc(grievance::Column::SubmissionDate);

    match role {
        Role::Student => Ok(base
            .filter(grievance::Column::StudentId.eq(user_id))
            .all(db)
            .await?),
        Role::Teacher => {
            let assignments = AssignmentModel::find_for_teacher(db, user_id).await?;
            if assignments.is_empty() {
                return Ok(vec![]);
            }
            let exam_ids: Vec<i64> = assignments.iter().map(|a| a.exam_id).collect();

            let sheets = answer_sheet::Entity::find()
                .filter(answer_sheet::Column::ExamId.is_in(exam_ids))
                .all(db)
                .await?;
            if sheets.is_empty() {
                return Ok(vec![]);
            }
            let sheet_ids: Vec<i64> = sheets.iter().map(|s| s.id).collect();

            Ok(base
                .filter(grievance::Column::AnswerSheetId.is_in(sheet_ids))
                .all(db)
                .await?)
        }
        Role::Admin => Ok(base.all(db).await?),
    }
}

/// Sheet volume per department, derived through the exam → subject →
/// department chain. Departments with no sheets are included with a zero
/// count so overview tables stay complete.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentSheetCount {
    pub department_id: i64,
    pub department: String,
    pub sheets: u64,
}

pub async fn department_breakdown(
    db: &DatabaseConnection,
) -> Result<Vec<DepartmentSheetCount>, DomainError> {
    let departments = department::Entity::find()
        .order_by_asc(department::Column::Name)
        .all(db)
        .await?;
    let subjects = subject::Entity::find().all(db).await?;
    let exams = exam::Entity::find().all(db).await?;
    let sheets = answer_sheet::Entity::find().all(db).await?;

    let subject_dept: HashMap<i64, i64> =
        subjects.iter().map(|s| (s.id, s.department_id)).collect();
    let exam_subject: HashMap<i64, i64> = exams.iter().map(|e| (e.id, e.subject_id)).collect();

    let mut counts: HashMap<i64, u64> = HashMap::new();
    for sheet in &sheets {
        let dept = exam_subject
            .get(&sheet.exam_id)
            .and_then(|subject_id| subject_dept.get(subject_id));
        if let Some(&dept_id) = dept {
            *counts.entry(dept_id).or_insert(0) += 1;
        }
    }

    Ok(departments
        .into_iter()
        .map(|d| DepartmentSheetCount {
            sheets: counts.get(&d.id).copied().unwrap_or(0),
            department_id: d.id,
            department: d.name,
        })
        .collect())
}

/// Aggregate totals for the admin landing page.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewCounts {
    pub exams: u64,
    pub answer_sheets: u64,
    pub pending_sheets: u64,
    pub grievances_pending: u64,
    pub grievances_under_review: u64,
    pub grievances_resolved: u64,
    pub grievances_rejected: u64,
}

pub async fn overview_counts(db: &DatabaseConnection) -> Result<OverviewCounts, DomainError> {
    let grievance_count = |status: GrievanceStatus| {
        grievance::Entity::find()
            .filter(grievance::Column::Status.eq(status))
            .count(db)
    };

    Ok(OverviewCounts {
        exams: exam::Entity::find().count(db).await?,
        answer_sheets: answer_sheet::Entity::find().count(db).await?,
        pending_sheets: answer_sheet::Entity::find()
            .filter(answer_sheet::Column::GradingStatus.eq(GradingStatus::Pending))
            .count(db)
            .await?,
        grievances_pending: grievance_count(GrievanceStatus::Pending).await?,
        grievances_under_review: grievance_count(GrievanceStatus::UnderReview).await?,
        grievances_resolved: grievance_count(GrievanceStatus::Resolved).await?,
        grievances_rejected: grievance_count(GrievanceStatus::Rejected).await?,
    })
}
