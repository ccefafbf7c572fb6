use campus_core::db::open_db_in_memory;
use campus_core::{
    ConflictKind, CourseRequest, CourseService, EnrollmentService, NotFoundTarget, QueryService,
    ServiceError, SqliteCampusRepository, StudentDraft, StudentRepository, StudentRequest,
    StudentService,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn draft(school_number: &str) -> StudentDraft {
    StudentRequest::new("Ada", "Lovelace", school_number, Some("10-B".to_string()))
        .validate()
        .unwrap()
}

#[test]
fn create_assigns_id_and_get_roundtrips() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = StudentService::new(repo);

    let created = service.create_student(&draft("10001")).unwrap();
    assert!(created.id > 0);
    assert!(created.course_ids().is_empty());

    let loaded = service.get_student(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.student_class.as_deref(), Some("10-B"));
}

#[test]
fn create_rejects_duplicate_school_number() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = StudentService::new(repo);
    service.create_student(&draft("10001")).unwrap();

    let err = service.create_student(&draft("10001")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::DuplicateSchoolNumber(ref value)) if value == "10001"
    ));
    assert_eq!(repo.list_students().unwrap().len(), 1);
}

#[test]
fn update_overwrites_fields_and_keeps_memberships() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let students = StudentService::new(repo);
    let courses = CourseService::new(repo);
    let enrollment = EnrollmentService::new(repo);

    let student = students.create_student(&draft("10001")).unwrap();
    let course = courses
        .create_course(&CourseRequest::new("Math").validate().unwrap())
        .unwrap();
    enrollment.enroll(student.id, course.id).unwrap();

    let changes = StudentRequest::new("Grace", "Hopper", "20002", None)
        .validate()
        .unwrap();
    let updated = students.update_student(student.id, &changes).unwrap();
    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.student_class, None);

    let loaded = students.get_student(student.id).unwrap();
    assert_eq!(loaded.surname, "Hopper");
    assert_eq!(loaded.school_number, "20002");
    assert!(loaded.is_enrolled_in(course.id));
}

#[test]
fn update_allows_keeping_own_school_number() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = StudentService::new(repo);
    let student = service.create_student(&draft("10001")).unwrap();

    let changes = StudentRequest::new("Ada", "Byron", "10001", None)
        .validate()
        .unwrap();
    let updated = service.update_student(student.id, &changes).unwrap();
    assert_eq!(updated.surname, "Byron");
}

#[test]
fn update_rejects_school_number_of_another_student() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = StudentService::new(repo);
    service.create_student(&draft("10001")).unwrap();
    let second = service.create_student(&draft("20002")).unwrap();

    let err = service
        .update_student(second.id, &draft("10001"))
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(service.get_student(second.id).unwrap().school_number, "20002");
}

#[test]
fn update_and_delete_missing_student_return_not_found() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = StudentService::new(repo);

    let err = service.update_student(42, &draft("10001")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Student(42))
    ));

    let err = service.delete_student(42).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Student(42))
    ));
}

#[test]
fn delete_clears_enrollments_on_course_side() {
    let conn = setup();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let students = StudentService::new(repo);
    let courses = CourseService::new(repo);
    let enrollment = EnrollmentService::new(repo);
    let queries = QueryService::new(repo);

    let student = students.create_student(&draft("10001")).unwrap();
    let course = courses
        .create_course(&CourseRequest::new("Math").validate().unwrap())
        .unwrap();
    enrollment.enroll(student.id, course.id).unwrap();

    students.delete_student(student.id).unwrap();

    assert!(courses.get_course(course.id).unwrap().student_ids().is_empty());
    let empty_courses = queries.courses_without_students().unwrap();
    assert_eq!(empty_courses.len(), 1);
    assert_eq!(empty_courses[0].id, course.id);
}
