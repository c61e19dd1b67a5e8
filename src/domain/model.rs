//! Registry entities. Relations between them are stored as keys into the
//! registry's arenas, never as owned copies.

/// Index of a course in the registry's course arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseKey(pub usize);

/// Index of a student in the registry's student list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentKey(pub usize);

/// Index of an instructor in the registry's instructor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructorKey(pub usize);

/// Fields shared by students and instructors.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    /// `None` when the entered age had no leading digits.
    pub age: Option<i64>,
}

impl Person {
    pub fn new(name: impl Into<String>, age: Option<i64>) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub person: Person,
    pub roll_number: String,
    pub courses: Vec<CourseKey>,
}

impl Student {
    /// Creates a student already registered for `course`, when one is given.
    pub fn new(person: Person, roll_number: impl Into<String>, course: Option<CourseKey>) -> Self {
        Self {
            person,
            roll_number: roll_number.into(),
            courses: course.into_iter().collect(),
        }
    }

    /// Appends without checking for duplicates. Does not touch the course's roster.
    pub fn register_for_course(&mut self, course: CourseKey) {
        self.courses.push(course);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instructor {
    pub person: Person,
    pub salary: f64,
    pub courses: Vec<CourseKey>,
}

impl Instructor {
    pub fn new(person: Person, salary: f64, course: Option<CourseKey>) -> Self {
        Self {
            person,
            salary,
            courses: course.into_iter().collect(),
        }
    }

    pub fn assign_course(&mut self, course: CourseKey) {
        self.courses.push(course);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub students: Vec<StudentKey>,
    pub instructor: Option<InstructorKey>,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            students: Vec::new(),
            instructor: None,
        }
    }

    pub fn add_student(&mut self, student: StudentKey) {
        self.students.push(student);
    }

    /// Last assignment wins; any previous instructor is replaced silently.
    pub fn set_instructor(&mut self, instructor: InstructorKey) {
        self.instructor = Some(instructor);
    }

    pub fn enrolled_count(&self) -> usize {
        self.students.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub name: String,
    pub courses: Vec<CourseKey>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            courses: Vec::new(),
        }
    }

    pub fn add_course(&mut self, course: CourseKey) {
        self.courses.push(course);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_starts_with_selected_course() {
        let student = Student::new(Person::new("Ava", Some(20)), "R1", Some(CourseKey(2)));
        assert_eq!(student.courses, vec![CourseKey(2)]);
        assert_eq!(student.person.name(), "Ava");

        let unlinked = Student::new(Person::new("Ben", Some(19)), "R2", None);
        assert!(unlinked.courses.is_empty());
    }

    #[test]
    fn test_register_for_course_keeps_duplicates() {
        let mut student = Student::new(Person::new("Ava", Some(20)), "R1", None);
        student.register_for_course(CourseKey(0));
        student.register_for_course(CourseKey(0));
        assert_eq!(student.courses, vec![CourseKey(0), CourseKey(0)]);
    }

    #[test]
    fn test_assign_course_appends() {
        let mut instructor = Instructor::new(
            Person::new("Dr. Lee", Some(45)),
            50000.0,
            Some(CourseKey(3)),
        );
        instructor.assign_course(CourseKey(1));
        assert_eq!(instructor.courses, vec![CourseKey(3), CourseKey(1)]);
    }

    #[test]
    fn test_set_instructor_overwrites() {
        let mut course = Course::new("C004", "Machine Learning");
        assert_eq!(course.instructor, None);
        course.set_instructor(InstructorKey(0));
        course.set_instructor(InstructorKey(1));
        assert_eq!(course.instructor, Some(InstructorKey(1)));
    }

    #[test]
    fn test_add_student_has_no_duplicate_check() {
        let mut course = Course::new("C003", "Data Structures");
        course.add_student(StudentKey(0));
        course.add_student(StudentKey(0));
        assert_eq!(course.enrolled_count(), 2);
    }

    #[test]
    fn test_department_add_course_keeps_order() {
        let mut department = Department::new("CS");
        department.add_course(CourseKey(4));
        department.add_course(CourseKey(2));
        department.add_course(CourseKey(4));
        assert_eq!(department.courses, vec![CourseKey(4), CourseKey(2), CourseKey(4)]);
    }
}
