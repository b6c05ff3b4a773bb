use std::collections::{BTreeMap, BTreeSet};

use crate::error::DomainError;
use crate::models::exam_teacher_assignment::Model as AssignmentModel;
use crate::tests::helpers::fixture;

#[tokio::test]
async fn assign_then_authorized_questions_round_trips() {
    let f = fixture().await;

    // The fixture assigned questions 1-3 to the teacher.
    let questions = AssignmentModel::authorized_questions(&f.db, f.exam.id, f.teacher.id)
        .await
        .unwrap();
    assert_eq!(questions, BTreeSet::from([1, 2, 3]));
}

#[tokio::test]
async fn unassigned_teacher_has_no_authorized_questions() {
    let f = fixture().await;

    let questions = AssignmentModel::authorized_questions(&f.db, f.exam.id, f.other_teacher.id)
        .await
        .unwrap();
    assert!(questions.is_empty());
}

#[tokio::test]
async fn overlapping_questions_across_teachers_are_rejected() {
    let f = fixture().await;

    let result = AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([3, 4]),
        &BTreeMap::from([(3, 10), (4, 10)]),
    )
    .await;

    match result {
        Err(DomainError::Overlap {
            question_number,
            teacher_id,
        }) => {
            assert_eq!(question_number, 3);
            assert_eq!(teacher_id, f.teacher.id);
        }
        other => panic!("expected Overlap, got {other:?}"),
    }

    // The conflicting teacher gained nothing.
    let questions = AssignmentModel::authorized_questions(&f.db, f.exam.id, f.other_teacher.id)
        .await
        .unwrap();
    assert!(questions.is_empty());
}

#[tokio::test]
async fn disjoint_assignment_is_accepted() {
    let f = fixture().await;

    AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([4, 5]),
        &BTreeMap::from([(4, 10), (5, 10)]),
    )
    .await
    .unwrap();

    let questions = AssignmentModel::authorized_questions(&f.db, f.exam.id, f.other_teacher.id)
        .await
        .unwrap();
    assert_eq!(questions, BTreeSet::from([4, 5]));
}

#[tokio::test]
async fn reassigning_the_same_teacher_replaces_the_question_set() {
    let f = fixture().await;

    AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.teacher.id,
        &BTreeSet::from([2, 3]),
        &BTreeMap::from([(2, 5), (3, 15)]),
    )
    .await
    .unwrap();

    let questions = AssignmentModel::authorized_questions(&f.db, f.exam.id, f.teacher.id)
        .await
        .unwrap();
    assert_eq!(questions, BTreeSet::from([2, 3]));

    // Still exactly one row for the (exam, teacher) pair.
    let rows = AssignmentModel::find_for_exam(&f.db, f.exam.id).await.unwrap();
    assert_eq!(rows.len(), 1);

    let max = AssignmentModel::max_marks_for(&f.db, f.exam.id, 3)
        .await
        .unwrap();
    assert_eq!(max, Some(15));
}

#[tokio::test]
async fn assignment_validation_rejects_malformed_input() {
    let f = fixture().await;

    // Question set and marks keys disagree.
    let mismatch = AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([4, 5]),
        &BTreeMap::from([(4, 10)]),
    )
    .await;
    assert!(matches!(mismatch, Err(DomainError::InvalidAssignment(_))));

    // Question numbers must be positive.
    let non_positive = AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([0]),
        &BTreeMap::from([(0, 10)]),
    )
    .await;
    assert!(matches!(non_positive, Err(DomainError::InvalidAssignment(_))));

    // Maximum marks must be positive.
    let zero_max = AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::from([4]),
        &BTreeMap::from([(4, 0)]),
    )
    .await;
    assert!(matches!(zero_max, Err(DomainError::InvalidAssignment(_))));

    // Empty assignments are meaningless.
    let empty = AssignmentModel::assign(
        &f.db,
        f.exam.id,
        f.other_teacher.id,
        &BTreeSet::new(),
        &BTreeMap::new(),
    )
    .await;
    assert!(matches!(empty, Err(DomainError::InvalidAssignment(_))));
}

#[tokio::test]
async fn max_marks_for_unknown_question_is_none() {
    let f = fixture().await;

    let max = AssignmentModel::max_marks_for(&f.db, f.exam.id, 99)
        .await
        .unwrap();
    assert_eq!(max, None);
}
