use crate::config::RegistryConfig;
use crate::domain::model::{
    Course, CourseKey, Department, Instructor, InstructorKey, Student, StudentKey,
};

/// Every collection the program knows about. Created once at startup and
/// passed by `&mut` into each handler.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    courses: Vec<Course>,
    departments: Vec<Department>,
    students: Vec<Student>,
    instructors: Vec<Instructor>,
}

impl Registry {
    /// 依照配置建立課程與系所的初始資料
    pub fn seeded(config: &RegistryConfig) -> Self {
        let courses: Vec<Course> = config
            .courses
            .iter()
            .map(|seed| Course::new(seed.id.clone(), seed.name.clone()))
            .collect();

        let mut registry = Self {
            courses,
            ..Self::default()
        };

        for seed in &config.departments {
            let mut department = Department::new(seed.name.clone());
            for name in &seed.courses {
                match registry.course_by_name(name) {
                    Some(key) => department.add_course(key),
                    None => tracing::warn!(
                        "⚠️ Seed department '{}' references unknown course '{}'",
                        seed.name,
                        name
                    ),
                }
            }
            registry.departments.push(department);
        }

        tracing::debug!(
            "Registry seeded with {} courses and {} departments",
            registry.courses.len(),
            registry.departments.len()
        );
        registry
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn course(&self, key: CourseKey) -> Option<&Course> {
        self.courses.get(key.0)
    }

    pub fn course_mut(&mut self, key: CourseKey) -> Option<&mut Course> {
        self.courses.get_mut(key.0)
    }

    pub fn student(&self, key: StudentKey) -> Option<&Student> {
        self.students.get(key.0)
    }

    pub fn instructor(&self, key: InstructorKey) -> Option<&Instructor> {
        self.instructors.get(key.0)
    }

    /// Linear scan; course names are unique.
    pub fn course_by_name(&self, name: &str) -> Option<CourseKey> {
        self.courses
            .iter()
            .position(|course| course.name == name)
            .map(CourseKey)
    }

    pub fn course_names(&self) -> Vec<String> {
        self.courses.iter().map(|course| course.name.clone()).collect()
    }

    pub fn push_student(&mut self, student: Student) -> StudentKey {
        self.students.push(student);
        StudentKey(self.students.len() - 1)
    }

    pub fn push_instructor(&mut self, instructor: Instructor) -> InstructorKey {
        self.instructors.push(instructor);
        InstructorKey(self.instructors.len() - 1)
    }

    pub fn push_department(&mut self, department: Department) {
        self.departments.push(department);
    }
}
