use campus_core::db::open_db_in_memory;
use campus_core::{
    CapacityLimit, ConflictKind, CourseId, CourseRequest, CourseService, Enrollment,
    EnrollmentRepository, EnrollmentService, NotFoundTarget, ServiceError, SqliteCampusRepository, StudentId,
    StudentRequest, StudentService, MAX_COURSES_PER_STUDENT, MAX_STUDENTS_PER_COURSE,
};

fn create_student(repo: SqliteCampusRepository<'_>, school_number: &str) -> StudentId {
    let draft = StudentRequest::new("Student", "Example", school_number, None)
        .validate()
        .unwrap();
    StudentService::new(repo).create_student(&draft).unwrap().id
}

fn create_course(repo: SqliteCampusRepository<'_>, name: &str) -> CourseId {
    let draft = CourseRequest::new(name).validate().unwrap();
    CourseService::new(repo).create_course(&draft).unwrap().id
}

#[test]
fn enroll_links_both_sides() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let student_id = create_student(repo, "10001");
    let course_id = create_course(repo, "Math");

    let enrollment = EnrollmentService::new(repo)
        .enroll(student_id, course_id)
        .unwrap();
    assert_eq!(
        enrollment,
        Enrollment {
            student_id,
            course_id
        }
    );

    let student = StudentService::new(repo).get_student(student_id).unwrap();
    let course = CourseService::new(repo).get_course(course_id).unwrap();
    assert_eq!(
        student.course_ids().iter().copied().collect::<Vec<_>>(),
        vec![course_id]
    );
    assert_eq!(
        course.student_ids().iter().copied().collect::<Vec<_>>(),
        vec![student_id]
    );
}

#[test]
fn enroll_twice_is_duplicate_enrollment() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let student_id = create_student(repo, "10001");
    let course_id = create_course(repo, "Math");
    let service = EnrollmentService::new(repo);

    service.enroll(student_id, course_id).unwrap();
    let err = service.enroll(student_id, course_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::DuplicateEnrollment { student_id: s, course_id: c })
            if s == student_id && c == course_id
    ));

    let course = CourseService::new(repo).get_course(course_id).unwrap();
    assert_eq!(course.student_count(), 1);
}

#[test]
fn sixth_course_is_rejected_by_student_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let student_id = create_student(repo, "10001");
    let service = EnrollmentService::new(repo);

    for idx in 0..MAX_COURSES_PER_STUDENT {
        let course_id = create_course(repo, &format!("Course {idx}"));
        service.enroll(student_id, course_id).unwrap();
    }
    let extra = create_course(repo, "Extra");

    let err = service.enroll(student_id, extra).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::CapacityExceeded(
            CapacityLimit::CoursesPerStudent
        ))
    ));
    assert_eq!(err.code(), "capacity_exceeded");
    assert!(CourseService::new(repo)
        .get_course(extra)
        .unwrap()
        .student_ids()
        .is_empty());
}

#[test]
fn fifty_first_student_is_rejected_by_course_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let course_id = create_course(repo, "Popular");
    let service = EnrollmentService::new(repo);

    for idx in 0..MAX_STUDENTS_PER_COURSE {
        let student_id = create_student(repo, &format!("S{:05}", idx));
        service.enroll(student_id, course_id).unwrap();
    }
    let late = create_student(repo, "LATE-00001");

    let err = service.enroll(late, course_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::CapacityExceeded(
            CapacityLimit::StudentsPerCourse
        ))
    ));
    assert!(StudentService::new(repo)
        .get_student(late)
        .unwrap()
        .course_ids()
        .is_empty());
}

#[test]
fn student_limit_is_reported_before_course_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let service = EnrollmentService::new(repo);

    let full_course = create_course(repo, "Full");
    for idx in 0..MAX_STUDENTS_PER_COURSE {
        let student_id = create_student(repo, &format!("F{:05}", idx));
        service.enroll(student_id, full_course).unwrap();
    }

    let busy_student = create_student(repo, "BUSY-0001");
    for idx in 0..MAX_COURSES_PER_STUDENT {
        let course_id = create_course(repo, &format!("Other {idx}"));
        service.enroll(busy_student, course_id).unwrap();
    }

    let err = service.enroll(busy_student, full_course).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::CapacityExceeded(
            CapacityLimit::CoursesPerStudent
        ))
    ));
}

#[test]
fn missing_student_is_reported_before_missing_course() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let course_id = create_course(repo, "Math");
    let service = EnrollmentService::new(repo);

    let err = service.enroll(999, course_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Student(999))
    ));

    let err = service.enroll(999, 888).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Student(999))
    ));

    let student_id = create_student(repo, "10001");
    let err = service.enroll(student_id, 888).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Course(888))
    ));
}

#[test]
fn capacity_error_message_names_the_counted_side() {
    let err = ServiceError::Conflict(ConflictKind::CapacityExceeded(
        CapacityLimit::CoursesPerStudent,
    ));
    assert_eq!(
        err.to_string(),
        "maximum number of course registrations (5) reached"
    );
}

#[test]
fn duplicate_is_reported_before_student_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let student_id = create_student(repo, "10001");
    let service = EnrollmentService::new(repo);

    let mut course_ids = Vec::new();
    for idx in 0..MAX_COURSES_PER_STUDENT {
        let course_id = create_course(repo, &format!("Course {idx}"));
        service.enroll(student_id, course_id).unwrap();
        course_ids.push(course_id);
    }

    let err = service.enroll(student_id, course_ids[0]).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::DuplicateEnrollment { .. })
    ));
    assert_eq!(err.code(), "duplicate_enrollment");
}

#[test]
fn duplicate_is_reported_before_course_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let course_id = create_course(repo, "Popular");
    let service = EnrollmentService::new(repo);

    let mut student_ids = Vec::new();
    for idx in 0..MAX_STUDENTS_PER_COURSE {
        let student_id = create_student(repo, &format!("S{:05}", idx));
        service.enroll(student_id, course_id).unwrap();
        student_ids.push(student_id);
    }

    let err = service.enroll(student_ids[0], course_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::DuplicateEnrollment { .. })
    ));
}

#[test]
fn save_enrollment_writes_only_the_new_link() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCampusRepository::try_new(&conn).unwrap();
    let student_id = create_student(repo, "10001");
    let old_course = create_course(repo, "Old");
    let new_course = create_course(repo, "New");
    EnrollmentService::new(repo)
        .enroll(student_id, old_course)
        .unwrap();

    let stale_student = StudentService::new(repo).get_student(student_id).unwrap();
    let target = CourseService::new(repo).get_course(new_course).unwrap();
    CourseService::new(repo).delete_course(old_course).unwrap();

    repo.save_enrollment(&stale_student, &target).unwrap();

    let student = StudentService::new(repo).get_student(student_id).unwrap();
    assert_eq!(
        student.course_ids().iter().copied().collect::<Vec<_>>(),
        vec![new_course]
    );
}
