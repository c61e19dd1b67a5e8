use crate::config::AdmissionConfig;
use crate::core::registry::Registry;
use crate::domain::model::{Department, Instructor, InstructorKey, Person, Student, StudentKey};
use crate::domain::ports::{Interaction, PromptField};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{parse_lenient_int, parse_number};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Instructor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Instructor => write!(f, "Instructor"),
        }
    }
}

/// Soft rejection. Nothing was written to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    BelowMinimumAge { role: Role, minimum: u32 },
    UnparsedAge { role: Role },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BelowMinimumAge { role, minimum } => {
                write!(f, "{} not added. Minimum age should be {}.", role, minimum)
            }
            Rejection::UnparsedAge { role } => {
                write!(f, "{} not added. Age must be a number.", role)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission<K> {
    Admitted(K),
    Rejected(Rejection),
}

/// What a handler reports back to the menu loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    StudentAdded(StudentKey),
    InstructorAdded(InstructorKey),
    DepartmentAdded(usize),
    Rejected(Rejection),
    Listed { lines: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub age: String,
    pub roll_number: String,
    pub course: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorForm {
    pub name: String,
    pub age: String,
    pub salary: f64,
    pub course: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentForm {
    pub name: String,
    pub courses: Vec<String>,
}

fn check_age(
    role: Role,
    age: Option<i64>,
    minimum: u32,
    policy: &AdmissionConfig,
) -> Option<Rejection> {
    match age {
        Some(age) if age < i64::from(minimum) => {
            Some(Rejection::BelowMinimumAge { role, minimum })
        }
        Some(_) => None,
        None if policy.reject_unparsed_age => Some(Rejection::UnparsedAge { role }),
        None => {
            // 非數字的年齡不會觸發門檻，照原行為放行
            tracing::warn!("⚠️ {} age is not a number, threshold check skipped", role);
            None
        }
    }
}

/// Creates a student and links it to the chosen course in both directions.
pub fn admit_student(
    registry: &mut Registry,
    policy: &AdmissionConfig,
    form: StudentForm,
) -> Admission<StudentKey> {
    let age = parse_lenient_int(&form.age);
    if let Some(rejection) = check_age(Role::Student, age, policy.min_student_age, policy) {
        tracing::info!("🚫 {}", rejection);
        return Admission::Rejected(rejection);
    }

    let course = form
        .course
        .as_deref()
        .and_then(|name| registry.course_by_name(name));
    if course.is_none() {
        tracing::debug!("Student '{}' created without a course link", form.name);
    }

    let student = Student::new(Person::new(form.name, age), form.roll_number, course);
    let key = registry.push_student(student);
    if let Some(course) = course.and_then(|c| registry.course_mut(c)) {
        course.add_student(key);
    }

    tracing::info!("✅ Student added: {:?} (course: {:?})", key, course);
    Admission::Admitted(key)
}

/// Creates an instructor and makes it the chosen course's instructor.
pub fn admit_instructor(
    registry: &mut Registry,
    policy: &AdmissionConfig,
    form: InstructorForm,
) -> Admission<InstructorKey> {
    let age = parse_lenient_int(&form.age);
    if let Some(rejection) = check_age(Role::Instructor, age, policy.min_instructor_age, policy) {
        tracing::info!("🚫 {}", rejection);
        return Admission::Rejected(rejection);
    }

    let course = form
        .course
        .as_deref()
        .and_then(|name| registry.course_by_name(name));

    let instructor = Instructor::new(Person::new(form.name, age), form.salary, course);
    let key = registry.push_instructor(instructor);
    if let Some(course) = course.and_then(|c| registry.course_mut(c)) {
        if let Some(previous) = course.instructor {
            tracing::debug!("Course '{}' instructor {:?} replaced", course.name, previous);
        }
        course.set_instructor(key);
    }

    tracing::info!("✅ Instructor added: {:?} (course: {:?})", key, course);
    Admission::Admitted(key)
}

/// Appends a department. Returns its position in the registry.
pub fn create_department(registry: &mut Registry, form: DepartmentForm) -> usize {
    let mut department = Department::new(form.name);
    for name in &form.courses {
        match registry.course_by_name(name) {
            Some(key) => department.add_course(key),
            None => tracing::debug!("Department course '{}' not found, skipped", name),
        }
    }
    registry.push_department(department);

    let index = registry.departments().len() - 1;
    tracing::info!("✅ Department added at position {}", index);
    index
}

/// One line per department followed by one tab-indented line per course.
pub fn department_roster(registry: &Registry) -> Vec<String> {
    let mut lines = Vec::new();
    for department in registry.departments() {
        lines.push(department.name.clone());
        for course in department.courses.iter().filter_map(|&key| registry.course(key)) {
            lines.push(format!("\t{} - {} students", course.name, course.enrolled_count()));
        }
    }
    lines
}

fn salary_filter(raw: &str) -> String {
    match parse_number(raw) {
        Some(value) => value.to_string(),
        None => raw.trim().to_string(),
    }
}

fn salary_validator(value: &str) -> std::result::Result<(), String> {
    parse_number(value)
        .map(|_| ())
        .ok_or_else(|| "Please enter a number".to_string())
}

async fn prompt_text<I: Interaction + ?Sized>(io: &mut I, field: PromptField) -> Result<String> {
    let name = field.name;
    io.prompt(&field).await?.into_text(name)
}

/// 課程清單為空時不詢問，回傳 None
async fn prompt_course<I: Interaction + ?Sized>(
    io: &mut I,
    registry: &Registry,
) -> Result<Option<String>> {
    let choices = registry.course_names();
    if choices.is_empty() {
        return Ok(None);
    }
    prompt_text(io, PromptField::select("course", "Select Course:", choices))
        .await
        .map(Some)
}

async fn report<I: Interaction + ?Sized, K>(
    io: &mut I,
    admission: Admission<K>,
    role: Role,
    added: impl FnOnce(K) -> Outcome,
) -> Result<Outcome> {
    match admission {
        Admission::Admitted(key) => {
            io.emit(&format!("{} Added Successfully!", role)).await?;
            Ok(added(key))
        }
        Admission::Rejected(rejection) => {
            io.emit(&rejection.to_string()).await?;
            Ok(Outcome::Rejected(rejection))
        }
    }
}

pub async fn add_student<I: Interaction + ?Sized>(
    registry: &mut Registry,
    policy: &AdmissionConfig,
    io: &mut I,
) -> Result<Outcome> {
    let name = prompt_text(io, PromptField::input("name", "Enter Student Name:")).await?;
    let age = prompt_text(
        io,
        PromptField::input("age", "Enter Student Age:")
            .with_default(policy.min_student_age.to_string()),
    )
    .await?;
    let roll_number =
        prompt_text(io, PromptField::input("roll_number", "Enter Student Roll Number:")).await?;
    let course = prompt_course(io, registry).await?;

    let form = StudentForm {
        name,
        age,
        roll_number,
        course,
    };
    let admission = admit_student(registry, policy, form);
    report(io, admission, Role::Student, Outcome::StudentAdded).await
}

pub async fn add_instructor<I: Interaction + ?Sized>(
    registry: &mut Registry,
    policy: &AdmissionConfig,
    io: &mut I,
) -> Result<Outcome> {
    let name = prompt_text(io, PromptField::input("name", "Enter Instructor Name:")).await?;
    let age = prompt_text(
        io,
        PromptField::input("age", "Enter Instructor Age:")
            .with_default(policy.min_instructor_age.to_string()),
    )
    .await?;
    let salary_text = prompt_text(
        io,
        PromptField::input("salary", "Enter Instructor Salary:")
            .with_filter(salary_filter)
            .with_validator(salary_validator),
    )
    .await?;
    let salary = parse_number(&salary_text).ok_or_else(|| RegistryError::PromptError {
        field: "salary".to_string(),
        message: format!("'{}' passed validation but is not a number", salary_text),
    })?;
    let course = prompt_course(io, registry).await?;

    let form = InstructorForm {
        name,
        age,
        salary,
        course,
    };
    let admission = admit_instructor(registry, policy, form);
    report(io, admission, Role::Instructor, Outcome::InstructorAdded).await
}

pub async fn add_department<I: Interaction + ?Sized>(
    registry: &mut Registry,
    io: &mut I,
) -> Result<Outcome> {
    let name = prompt_text(io, PromptField::input("name", "Enter Department Name:")).await?;
    let courses = io
        .prompt(&PromptField::multi_select(
            "courses",
            "Select Courses:",
            registry.course_names(),
        ))
        .await?
        .into_choices("courses")?;

    let index = create_department(registry, DepartmentForm { name, courses });
    io.emit("Department Added Successfully!").await?;
    Ok(Outcome::DepartmentAdded(index))
}

pub async fn list_departments<I: Interaction + ?Sized>(
    registry: &Registry,
    io: &mut I,
) -> Result<Outcome> {
    let lines = department_roster(registry);
    for line in &lines {
        io.emit(line).await?;
    }
    Ok(Outcome::Listed { lines: lines.len() })
}
