use campus_core::{
    CapacityLimit, ConflictKind, CourseRepository, CourseRequest, CourseService,
    EnrollmentRepository, EnrollmentService, InMemoryCampusRepository, NotFoundTarget,
    QueryService, RepoError, ServiceError, StudentRepository, StudentRequest, StudentService,
    MAX_COURSES_PER_STUDENT,
};

fn student_request(school_number: &str) -> StudentRequest {
    StudentRequest::new("Ada", "Lovelace", school_number, None)
}

#[test]
fn scenario_enroll_first_course() {
    let repo = InMemoryCampusRepository::new();
    let student = StudentService::new(&repo)
        .create_student(&student_request("10001").validate().unwrap())
        .unwrap();
    let course = CourseService::new(&repo)
        .create_course(&CourseRequest::new("Math").validate().unwrap())
        .unwrap();
    assert_eq!(student.id, 1);
    assert_eq!(course.id, 1);

    EnrollmentService::new(&repo)
        .enroll(student.id, course.id)
        .unwrap();

    let student = repo.find_student(student.id).unwrap().unwrap();
    let course = repo.find_course(course.id).unwrap().unwrap();
    assert!(student.is_enrolled_in(course.id));
    assert!(course.has_student(student.id));
}

#[test]
fn scenario_student_with_five_courses() {
    let repo = InMemoryCampusRepository::new();
    let courses = CourseService::new(&repo);
    let enrollment = EnrollmentService::new(&repo);
    let student = StudentService::new(&repo)
        .create_student(&student_request("10001").validate().unwrap())
        .unwrap();

    for idx in 1..=MAX_COURSES_PER_STUDENT {
        let course = courses
            .create_course(&CourseRequest::new(format!("C{idx}")).validate().unwrap())
            .unwrap();
        enrollment.enroll(student.id, course.id).unwrap();
    }
    let target = courses
        .create_course(&CourseRequest::new("C20").validate().unwrap())
        .unwrap();

    let err = enrollment.enroll(student.id, target.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(ConflictKind::CapacityExceeded(
            CapacityLimit::CoursesPerStudent
        ))
    ));
}

#[test]
fn scenario_unknown_student() {
    let repo = InMemoryCampusRepository::new();
    let course = CourseService::new(&repo)
        .create_course(&CourseRequest::new("Math").validate().unwrap())
        .unwrap();

    let err = EnrollmentService::new(&repo)
        .enroll(999, course.id)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundTarget::Student(999))
    ));
}

#[test]
fn unique_columns_are_enforced_by_the_store() {
    let repo = InMemoryCampusRepository::new();
    let draft = student_request("10001").validate().unwrap();
    repo.insert_student(&draft).unwrap();

    let err = repo.insert_student(&draft).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UniqueViolation {
            table: "students",
            column: "school_number"
        }
    ));
}

#[test]
fn delete_cascades_and_queries_follow() {
    let repo = InMemoryCampusRepository::new();
    let students = StudentService::new(&repo);
    let courses = CourseService::new(&repo);
    let queries = QueryService::new(&repo);

    let ada = students
        .create_student(&student_request("10001").validate().unwrap())
        .unwrap();
    let math = courses
        .create_course(&CourseRequest::new("Math").validate().unwrap())
        .unwrap();
    EnrollmentService::new(&repo).enroll(ada.id, math.id).unwrap();
    assert!(queries.courses_without_students().unwrap().is_empty());

    courses.delete_course(math.id).unwrap();

    assert!(students.get_student(ada.id).unwrap().course_ids().is_empty());
    assert_eq!(queries.students_without_courses().unwrap().len(), 1);
    let summary = queries.students_with_course_summary().unwrap();
    assert_eq!(summary[0].course_names, "");
}

#[test]
fn save_enrollment_ignores_stale_ids_in_memory() {
    let repo = InMemoryCampusRepository::new();
    let student = StudentService::new(&repo)
        .create_student(&student_request("10001").validate().unwrap())
        .unwrap();
    let old = CourseService::new(&repo)
        .create_course(&CourseRequest::new("Old").validate().unwrap())
        .unwrap();
    let new = CourseService::new(&repo)
        .create_course(&CourseRequest::new("New").validate().unwrap())
        .unwrap();
    EnrollmentService::new(&repo).enroll(student.id, old.id).unwrap();

    let stale = repo.find_student(student.id).unwrap().unwrap();
    CourseService::new(&repo).delete_course(old.id).unwrap();
    repo.save_enrollment(&stale, &new).unwrap();

    let student = repo.find_student(student.id).unwrap().unwrap();
    assert_eq!(
        student.course_ids().iter().copied().collect::<Vec<_>>(),
        vec![new.id]
    );
    assert!(repo.find_course(new.id).unwrap().unwrap().has_student(student.id));
}
