use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::error::DomainError;
use crate::models::answer_sheet::{Entity as SheetEntity, Model as SheetModel};
use crate::models::grievance::{GrievanceStatus, Model as GrievanceModel};
use crate::models::question_mark::{self, Model as QuestionMarkModel};
use crate::tests::helpers::{Fixture, fixture, standard_marks};

/// Grades the fixture sheet (6/7/8 over questions 1-3) and files a grievance
/// over question 3, which holds 8 of 10 marks at submission time.
async fn graded_fixture_with_grievance() -> (Fixture, GrievanceModel) {
    let f = fixture().await;

    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    let grievance = GrievanceModel::submit(
        &f.db,
        f.student.id,
        f.sheet.id,
        3,
        None,
        "Part (b) was marked as unattempted but is on the back page",
        8,
    )
    .await
    .unwrap();

    (f, grievance)
}

#[tokio::test]
async fn submit_creates_a_pending_grievance_with_a_marks_snapshot() {
    let (_f, grievance) = graded_fixture_with_grievance().await;

    assert_eq!(grievance.status, GrievanceStatus::Pending);
    assert_eq!(grievance.current_marks, 8);
    assert_eq!(grievance.updated_marks, None);
    assert_eq!(grievance.reviewer_id, None);
}

#[tokio::test]
async fn submit_requires_a_completed_sheet() {
    let f = fixture().await;

    let result = GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 1, None, "too harsh", 0)
        .await;
    assert!(matches!(result, Err(DomainError::SheetNotGraded)));
}

#[tokio::test]
async fn submit_requires_sheet_ownership() {
    let f = fixture().await;
    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    let result =
        GrievanceModel::submit(&f.db, f.other_student.id, f.sheet.id, 3, None, "not mine", 8)
            .await;
    assert!(matches!(result, Err(DomainError::NotSheetOwner)));
}

#[tokio::test]
async fn submit_rejects_a_stale_marks_claim() {
    let f = fixture().await;
    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    // Question 3 actually holds 8; the student claims 6.
    let result = GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 3, None, "stale", 6).await;
    assert!(matches!(
        result,
        Err(DomainError::StaleMarks {
            claimed: 6,
            actual: 8
        })
    ));
}

#[tokio::test]
async fn submit_rejects_an_ungraded_question() {
    let f = fixture().await;
    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &standard_marks())
        .await
        .unwrap();

    let result = GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 7, None, "missing", 0)
        .await;
    assert!(matches!(result, Err(DomainError::MarkNotFound { .. })));
}

#[tokio::test]
async fn only_one_open_grievance_per_question_and_sub_question() {
    let (f, _grievance) = graded_fixture_with_grievance().await;

    let duplicate =
        GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 3, None, "again", 8).await;
    assert!(matches!(duplicate, Err(DomainError::DuplicateGrievance)));

    // A different sub-question of the same question is a separate dispute.
    GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 3, Some("b"), "sub-part", 8)
        .await
        .unwrap();
}

#[tokio::test]
async fn a_rejected_grievance_frees_the_slot_for_resubmission() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    GrievanceModel::reject(&f.db, grievance.id, f.teacher.id, "Marks stand")
        .await
        .unwrap();

    GrievanceModel::submit(&f.db, f.student.id, f.sheet.id, 3, None, "second attempt", 8)
        .await
        .unwrap();
}

#[tokio::test]
async fn begin_review_moves_pending_to_under_review_once() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    let reviewed = GrievanceModel::begin_review(&f.db, grievance.id, f.teacher.id)
        .await
        .unwrap();
    assert_eq!(reviewed.status, GrievanceStatus::UnderReview);
    assert_eq!(reviewed.reviewer_id, Some(f.teacher.id));

    let again = GrievanceModel::begin_review(&f.db, grievance.id, f.teacher.id).await;
    assert!(matches!(
        again,
        Err(DomainError::InvalidTransition {
            from: GrievanceStatus::UnderReview
        })
    ));
}

#[tokio::test]
async fn resolve_applies_the_correction_and_updates_the_sheet_total() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    let before = SheetEntity::find_by_id(f.sheet.id)
        .one(&f.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.obtained_marks, 21);

    let resolved = GrievanceModel::resolve(
        &f.db,
        grievance.id,
        f.teacher.id,
        "Agreed, back page was missed",
        9,
    )
    .await
    .unwrap();

    assert_eq!(resolved.status, GrievanceStatus::Resolved);
    assert_eq!(resolved.updated_marks, Some(9));
    assert_eq!(resolved.teacher_response.as_deref(), Some("Agreed, back page was missed"));
    assert!(resolved.reviewed_at.is_some());

    // The sheet total moved by exactly the delta (9 - 8).
    let after = SheetEntity::find_by_id(f.sheet.id)
        .one(&f.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.obtained_marks, 22);

    let ledger_total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(ledger_total, after.obtained_marks);
}

#[tokio::test]
async fn resolve_moves_the_total_by_exactly_the_mark_delta() {
    let f = fixture().await;

    // Question 3 graded 6 of 10; the sheet totals 6 + 7 + 6 = 19.
    let mut marks = standard_marks();
    marks[2].obtained_marks = 6;
    SheetModel::grade(&f.db, f.sheet.id, f.teacher.id, &marks)
        .await
        .unwrap();

    let grievance = GrievanceModel::submit(
        &f.db,
        f.student.id,
        f.sheet.id,
        3,
        None,
        "The final part was not considered at all",
        6,
    )
    .await
    .unwrap();

    GrievanceModel::resolve(&f.db, grievance.id, f.teacher.id, "agreed", 9)
        .await
        .unwrap();

    let sheet = SheetEntity::find_by_id(f.sheet.id)
        .one(&f.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sheet.obtained_marks, 19 + (9 - 6));
}

#[tokio::test]
async fn resolve_by_an_unassigned_reviewer_is_rejected() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    let result =
        GrievanceModel::resolve(&f.db, grievance.id, f.other_teacher.id, "mine now", 9).await;
    assert!(matches!(
        result,
        Err(DomainError::UnauthorizedReviewer { .. })
    ));

    let unchanged = GrievanceModel::find_for_student(&f.db, f.student.id)
        .await
        .unwrap();
    assert_eq!(unchanged[0].status, GrievanceStatus::Pending);
}

#[tokio::test]
async fn resolve_rejects_marks_above_the_question_maximum() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    let result = GrievanceModel::resolve(&f.db, grievance.id, f.teacher.id, "generous", 11).await;
    assert!(matches!(result, Err(DomainError::InvalidMarks { .. })));

    // Still open; the reviewer can try again with a sane value.
    let grievances = GrievanceModel::find_for_student(&f.db, f.student.id)
        .await
        .unwrap();
    assert!(!grievances[0].status.is_terminal());
}

#[tokio::test]
async fn reject_leaves_marks_untouched() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    let rejected = GrievanceModel::reject(&f.db, grievance.id, f.teacher.id, "Marks stand")
        .await
        .unwrap();
    assert_eq!(rejected.status, GrievanceStatus::Rejected);
    assert_eq!(rejected.updated_marks, None);

    let sheet = SheetEntity::find_by_id(f.sheet.id)
        .one(&f.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sheet.obtained_marks, 21);
}

#[tokio::test]
async fn a_failed_correction_keeps_the_grievance_open() {
    let (f, grievance) = graded_fixture_with_grievance().await;

    // Fault injection: remove the ledger entry underneath the grievance so
    // the correction step inside resolve() fails.
    question_mark::Entity::delete_many()
        .filter(question_mark::Column::AnswerSheetId.eq(f.sheet.id))
        .filter(question_mark::Column::QuestionNumber.eq(3))
        .exec(&f.db)
        .await
        .unwrap();

    let result = GrievanceModel::resolve(&f.db, grievance.id, f.teacher.id, "agreed", 9).await;
    assert!(matches!(result, Err(DomainError::MarkNotFound { .. })));

    // Atomicity: the grievance must not have reached a terminal state and
    // the sheet total must be exactly what the remaining ledger says.
    let grievances = GrievanceModel::find_for_student(&f.db, f.student.id)
        .await
        .unwrap();
    assert_eq!(grievances[0].status, GrievanceStatus::Pending);

    let sheet = SheetEntity::find_by_id(f.sheet.id)
        .one(&f.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sheet.obtained_marks, 21);
}

#[tokio::test]
async fn transitions_on_an_unknown_grievance_fail_with_not_found() {
    let f = fixture().await;

    let result = GrievanceModel::begin_review(&f.db, 424242, f.teacher.id).await;
    assert!(matches!(result, Err(DomainError::NotFound("grievance"))));
}

/// Terminal states are absorbing: drive the machine with random transition
/// sequences and assert that nothing ever moves a grievance out of
/// `resolved`/`rejected`.
#[tokio::test]
async fn terminal_states_absorb_random_transition_sequences() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for round in 0..8 {
        let (f, grievance) = graded_fixture_with_grievance().await;
        let mut terminal: Option<GrievanceStatus> = None;

        for _ in 0..12 {
            let action = rng.gen_range(0..3);
            let result = match action {
                0 => GrievanceModel::begin_review(&f.db, grievance.id, f.teacher.id)
                    .await
                    .map(|g| g.status),
                1 => GrievanceModel::resolve(&f.db, grievance.id, f.teacher.id, "ok", 9)
                    .await
                    .map(|g| g.status),
                _ => GrievanceModel::reject(&f.db, grievance.id, f.teacher.id, "no")
                    .await
                    .map(|g| g.status),
            };

            match (terminal, result) {
                (Some(reached), Ok(status)) => {
                    panic!("round {round}: left terminal state {reached} for {status}")
                }
                (Some(_), Err(e)) => {
                    assert!(matches!(e, DomainError::InvalidTransition { .. }));
                }
                (None, Ok(status)) if status.is_terminal() => terminal = Some(status),
                (None, _) => {}
            }
        }

        let final_status = GrievanceModel::find_for_student(&f.db, f.student.id)
            .await
            .unwrap()[0]
            .status;
        if let Some(reached) = terminal {
            assert_eq!(final_status, reached);
        }
    }
}
