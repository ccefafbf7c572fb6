use campus_core::db::open_db_in_memory;
use campus_core::{
    ConflictKind, CourseDraft, CourseRepository, CourseRequest, CourseService, EnrollmentService,
    NotFoundTarget, ServiceError, SqliteCampusRepository, StudentRequest, StudentService,
};

fn course(name: &str) -> CourseDraft {
    CourseRequest::new(name).validate().unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = CourseService::new(repo);

    let created = service.create_course(&course("  Chemistry ")).unwrap();
    assert_eq!(created.name, "Chemistry");

    let loaded = service.get_course(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_rejects_duplicate_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = CourseService::new(repo);
    service.create_course(&course("Math")).unwrap();

    let err = service.create_course(&course("Math")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::DuplicateCourseName(ref name)) if name == "Math"
    ));
    assert_eq!(err.code(), "duplicate_unique_field");
    assert_eq!(repo.list_courses().unwrap().len(), 1);
}

#[test]
fn update_renames_and_rejects_taken_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = CourseService::new(repo);
    let math = service.create_course(&course("Math")).unwrap();
    let physics = service.create_course(&course("Physics")).unwrap();

    let renamed = service.update_course(math.id, &course("Algebra")).unwrap();
    assert_eq!(renamed.name, "Algebra");
    assert_eq!(service.get_course(math.id).unwrap().name, "Algebra");

    let err = service
        .update_course(physics.id, &course("Algebra"))
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn missing_course_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = CourseService::new(repo);

    assert!(matches!(
        service.get_course(7).unwrap_err(),
        ServiceError::NotFound(NotFoundTarget::Course(7))
    ));
    assert!(service.update_course(7, &course("Math")).unwrap_err().is_not_found());
    assert!(service.delete_course(7).unwrap_err().is_not_found());
}

#[test]
fn delete_clears_enrollments_on_student_side() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let courses = CourseService::new(repo);
    let students = StudentService::new(repo);
    let enrollment = EnrollmentService::new(repo);

    let student = students
        .create_student(
            &StudentRequest::new("Alan", "Turing", "10001", None)
                .validate()
                .unwrap(),
        )
        .unwrap();
    let math = courses.create_course(&course("Math")).unwrap();
    let logic = courses.create_course(&course("Logic")).unwrap();
    enrollment.enroll(student.id, math.id).unwrap();
    enrollment.enroll(student.id, logic.id).unwrap();

    courses.delete_course(math.id).unwrap();

    let loaded = students.get_student(student.id).unwrap();
    assert_eq!(loaded.course_ids().iter().copied().collect::<Vec<_>>(), vec![logic.id]);
}
