use crate::error::DomainError;
use crate::models::question_mark::Model as QuestionMarkModel;
use crate::tests::helpers::fixture;

#[tokio::test]
async fn total_for_empty_sheet_is_zero() {
    let f = fixture().await;

    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn record_mark_rejects_out_of_range_marks() {
    let f = fixture().await;

    let over = QuestionMarkModel::record_mark(&f.db, f.sheet.id, 1, 10, 11, None, f.teacher.id)
        .await;
    assert!(matches!(
        over,
        Err(DomainError::InvalidMarks { got: 11, max: 10 })
    ));

    let negative =
        QuestionMarkModel::record_mark(&f.db, f.sheet.id, 1, 10, -1, None, f.teacher.id).await;
    assert!(matches!(negative, Err(DomainError::InvalidMarks { .. })));

    // Nothing was written on either failure.
    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn record_mark_overwrites_existing_entry() {
    let f = fixture().await;

    QuestionMarkModel::record_mark(&f.db, f.sheet.id, 1, 10, 4, Some("first pass"), f.teacher.id)
        .await
        .unwrap();
    QuestionMarkModel::record_mark(&f.db, f.sheet.id, 1, 10, 9, Some("second pass"), f.teacher.id)
        .await
        .unwrap();

    let entries = QuestionMarkModel::find_for_sheet(&f.db, f.sheet.id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].obtained_marks, 9);
    assert_eq!(entries[0].comments.as_deref(), Some("second pass"));

    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, 9);
}

#[tokio::test]
async fn correction_requires_an_existing_entry() {
    let f = fixture().await;

    let result =
        QuestionMarkModel::apply_grievance_correction(&f.db, f.sheet.id, 3, 5, f.teacher.id).await;
    assert!(matches!(
        result,
        Err(DomainError::MarkNotFound {
            question_number: 3,
            ..
        })
    ));
}

#[tokio::test]
async fn correction_overwrites_marks_and_grader() {
    let f = fixture().await;

    QuestionMarkModel::record_mark(&f.db, f.sheet.id, 3, 10, 6, None, f.teacher.id)
        .await
        .unwrap();

    let corrected =
        QuestionMarkModel::apply_grievance_correction(&f.db, f.sheet.id, 3, 9, f.other_teacher.id)
            .await
            .unwrap();
    assert_eq!(corrected.obtained_marks, 9);
    assert_eq!(corrected.graded_by, f.other_teacher.id);

    let total = QuestionMarkModel::total_for(&f.db, f.sheet.id).await.unwrap();
    assert_eq!(total, 9);
}

#[tokio::test]
async fn correction_respects_the_entry_maximum() {
    let f = fixture().await;

    QuestionMarkModel::record_mark(&f.db, f.sheet.id, 3, 10, 6, None, f.teacher.id)
        .await
        .unwrap();

    let result =
        QuestionMarkModel::apply_grievance_correction(&f.db, f.sheet.id, 3, 12, f.teacher.id)
            .await;
    assert!(matches!(
        result,
        Err(DomainError::InvalidMarks { got: 12, max: 10 })
    ));

    let entry = QuestionMarkModel::find_entry(&f.db, f.sheet.id, 3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.obtained_marks, 6);
}
