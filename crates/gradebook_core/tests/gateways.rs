mod common;

use common::seeded_db;
use gradebook_core::{
    GradeRecord, GradeRepository, ModelValidationError, RepoError, SqliteGradeRepository,
    SqliteStudentRepository, Student, StudentRepository, Subject,
};

#[test]
fn student_save_assigns_id_and_find_by_email_reads_it_back() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let saved = repo
        .save(&Student::new("chad", "darby", "chad@example.com"))
        .unwrap();
    let id = saved.id.unwrap();
    assert!(id > 1);

    let loaded = repo.find_by_email_address("chad@example.com").unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(repo.find_by_id(id).unwrap(), Some(saved));
}

#[test]
fn student_save_with_existing_id_overwrites_row() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut student = repo.find_by_id(1).unwrap().unwrap();
    student.last_name = "robinson".to_string();
    let saved = repo.save(&student).unwrap();

    assert_eq!(saved.id, Some(1));
    assert_eq!(repo.find_all().unwrap().len(), 1);
    assert_eq!(repo.find_by_id(1).unwrap().unwrap().last_name, "robinson");
}

#[test]
fn student_lookup_misses_are_empty_not_errors() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    assert_eq!(repo.find_by_id(0).unwrap(), None);
    assert_eq!(repo.find_by_email_address("nobody@example.com").unwrap(), None);
    assert!(!repo.exists_by_id(42).unwrap());
    assert!(repo.exists_by_id(1).unwrap());
}

#[test]
fn student_duplicate_email_is_a_constraint_violation() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo
        .save(&Student::new("other", "eric", "eric@example.com"))
        .unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[test]
fn student_save_with_blank_fields_fails_at_the_store() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    for student in [
        Student::new("", "darby", "chad@example.com"),
        Student::new("chad", "  ", "chad@example.com"),
        Student::new("chad", "darby", ""),
    ] {
        let err = repo.save(&student).unwrap_err();
        assert!(err.is_constraint_violation(), "unexpected error: {err}");
        assert!(!matches!(err, RepoError::Validation(_)));
    }
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn student_delete_by_id_is_idempotent() {
    let conn = seeded_db();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let saved = repo
        .save(&Student::new("chad", "darby", "chad@example.com"))
        .unwrap();
    let id = saved.id.unwrap();

    repo.delete_by_id(id).unwrap();
    repo.delete_by_id(id).unwrap();
    assert_eq!(repo.find_by_id(id).unwrap(), None);
}

#[test]
fn grade_gateways_are_scoped_to_their_subject_table() {
    let conn = seeded_db();
    let math = SqliteGradeRepository::try_new(&conn, Subject::Math).unwrap();
    let science = SqliteGradeRepository::try_new(&conn, Subject::Science).unwrap();

    let saved = math.save(&GradeRecord::new(Subject::Math, 1, 72.25)).unwrap();
    let id = saved.id.unwrap();

    assert_eq!(math.subject(), Subject::Math);
    assert_eq!(math.find_by_id(id).unwrap(), Some(saved));
    assert_eq!(science.find_by_id(id).unwrap(), None);
    assert_eq!(math.find_by_student_id(1).unwrap().len(), 2);
    assert_eq!(science.find_by_student_id(1).unwrap().len(), 1);
}

#[test]
fn grade_save_rejects_foreign_subject_and_out_of_range_values() {
    let conn = seeded_db();
    let history = SqliteGradeRepository::try_new(&conn, Subject::History).unwrap();

    let err = history
        .save(&GradeRecord::new(Subject::Math, 1, 50.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = history
        .save(&GradeRecord::new(Subject::History, 1, 100.5))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::GradeOutOfRange(_))
    ));
    assert_eq!(history.find_by_student_id(1).unwrap().len(), 1);
}

#[test]
fn grade_save_for_unknown_student_fails_at_the_store() {
    let conn = seeded_db();
    let science = SqliteGradeRepository::try_new(&conn, Subject::Science).unwrap();

    let err = science
        .save(&GradeRecord::new(Subject::Science, 2, 80.5))
        .unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[test]
fn grade_save_with_existing_id_overwrites_row() {
    let conn = seeded_db();
    let math = SqliteGradeRepository::try_new(&conn, Subject::Math).unwrap();

    let mut record = math.find_by_id(1).unwrap().unwrap();
    record.grade = 64.0;
    math.save(&record).unwrap();

    let grades = math.find_by_student_id(1).unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].grade, 64.0);
}

#[test]
fn grade_deletes_are_idempotent() {
    let conn = seeded_db();
    let history = SqliteGradeRepository::try_new(&conn, Subject::History).unwrap();
    history
        .save(&GradeRecord::new(Subject::History, 1, 90.0))
        .unwrap();

    history.delete_by_id(1).unwrap();
    history.delete_by_id(1).unwrap();
    assert_eq!(history.find_by_id(1).unwrap(), None);

    assert_eq!(history.delete_by_student_id(1).unwrap(), 1);
    assert_eq!(history.delete_by_student_id(1).unwrap(), 0);
    assert!(history.find_by_student_id(1).unwrap().is_empty());
}
