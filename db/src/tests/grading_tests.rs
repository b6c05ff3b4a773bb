use std::collections::{BTreeMap, BTreeSet};

use crate::error::DomainError;
use crate::models::answer_sheet::{GradingStatus, MarkEntry, Model as SheetModel};
use crate::models::exam_teacher_assignment::Model as AssignmentModel;
use crate::models::question_mark::Model as QuestionMarkModel;
use crate::tests::helpers::{fixture, standard_marks};

#[tokio::test]
async fn grading_completes_the_sheet_and_totals_the_ledger() {
    let f = fixture().await;

    let graded = SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    assert_eq!(graded.grading_status, GradingStatus::Completed);
    assert_eq!(graded.graded_by, Some(f.teacher.id));
    assert!(graded.graded_at.is_some());
    assert_eq!(graded.obtained_marks, 21);

    // Consistency invariant: the stored total always equals the ledger sum.
    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, graded.obtained_marks);
}

#[tokio::test]
async fn grading_rejects_questions_outside_the_assignment() {
    let f = fixture().await;

    let mut marks = standard_marks();
    marks.push(MarkEntry {
        question_number: 4,
        max_marks: 10,
        obtained_marks: 5,
        comments: None,
    });

    let result = SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &marks).await;
    assert!(matches!(
        result,
        Err(DomainError::UnauthorizedReviewer { .. })
    ));

    // The whole grade is rejected; no partial ledger writes.
    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn grading_requires_an_assignment_on_the_exam() {
    let f = fixture().await;

    let result = SheetModel::grade(&f.db, f.sheet.id, f.other_teacher.id, &standard_marks()).await;
    assert!(matches!(
        result,
        Err(DomainError::UnauthorizedReviewer { .. })
    ));
}

#[tokio::test]
async fn same_grader_regrade_overwrites_without_duplicates() {
    let f = fixture().await;

    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    let second_pass = vec![
        MarkEntry {
            question_number: 1,
            max_marks: 10,
            obtained_marks: 10,
            comments: None,
        },
        MarkEntry {
            question_number: 2,
            max_marks: 10,
            obtained_marks: 2,
            comments: None,
        },
        MarkEntry {
            question_number: 3,
            max_marks: 10,
            obtained_marks: 3,
            comments: None,
        },
    ];
    let regraded = SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &second_pass)
        .await
        .unwrap();

    assert_eq!(regraded.obtained_marks, 15);

    let entries = QuestionMarkModel::find_for_sheet(&f.db, f.sheet.id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 3, "re-grade must not duplicate ledger rows");
}

#[tokio::test]
async fn a_different_grader_cannot_regrade_a_completed_sheet() {
    let f = fixture().await;

    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    // Give the second teacher a disjoint, valid assignment on the exam.
    AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([4, 5]),
        &BTreeMap::from([(4, 10), (5, 10)]),
    )
    .await
    .unwrap();

    let result = SheetModel::grade(
        &f.db,
        f.sheet.id,
        f.other_teacher.id,
        &[MarkEntry {
            question_number: 4,
            max_marks: 10,
            obtained_marks: 5,
            comments: None,
        }],
    )
    .await;

    assert!(matches!(
        result,
        Err(DomainError::AlreadyGraded { .. })
    ));
}

#[tokio::test]
async fn derive_status_follows_the_ledger() {
    let f = fixture().await;

    let before = SheetModel::derive_status(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(before, GradingStatus::Pending);

    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    let after = SheetModel::derive_status(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(after, GradingStatus::Completed);
}

#[tokio::test]
async fn grading_an_unknown_sheet_fails() {
    let f = fixture().await;

    let result = SheetModel::grade(&f.db, 9999, f.teacher.id, &standard_marks()).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}
