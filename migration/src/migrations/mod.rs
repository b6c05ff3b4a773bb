pub mod m202607010001_create_departments;
pub mod m202607010002_create_users;
pub mod m202607010003_create_subjects;
pub mod m202607010004_create_exams;
pub mod m202607010005_create_exam_teacher_assignments;
pub mod m202607010006_create_answer_sheets;
pub mod m202607010007_create_question_marks;
pub mod m202607010008_create_annotations;
pub mod m202607010009_create_grievances;
