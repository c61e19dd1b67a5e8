use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_AGE_THRESHOLD: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub admission: AdmissionConfig,
    pub courses: Vec<CourseSeed>,
    pub departments: Vec<DepartmentSeed>,
}

/// Age thresholds applied when students and instructors are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    pub min_student_age: u32,
    pub min_instructor_age: u32,
    /// 年齡不是數字時是否拒絕（預設放行）
    pub reject_unparsed_age: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSeed {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSeed {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_student_age: 18,
            min_instructor_age: 30,
            reject_unparsed_age: false,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let courses = [
            ("C001", "Computer Security and Networks"),
            ("C002", "Cyber Security"),
            ("C003", "Data Structures"),
            ("C004", "Machine Learning"),
            ("C005", "Operating Systems"),
            ("C006", "Software Engineering"),
            ("C007", "Web Development"),
        ]
        .into_iter()
        .map(|(id, name)| CourseSeed {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        let departments = ["Computer Science", "Information Technology"]
            .into_iter()
            .map(|name| DepartmentSeed {
                name: name.to_string(),
                courses: Vec::new(),
            })
            .collect();

        Self {
            admission: AdmissionConfig::default(),
            courses,
            departments,
        }
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的區段使用內建預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換 ${VAR} 形式的環境變數，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn course_names(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range(
            "admission.min_student_age",
            self.admission.min_student_age,
            0,
            MAX_AGE_THRESHOLD,
        )?;
        validation::validate_range(
            "admission.min_instructor_age",
            self.admission.min_instructor_age,
            0,
            MAX_AGE_THRESHOLD,
        )?;

        for (i, course) in self.courses.iter().enumerate() {
            validation::validate_non_empty_string(&format!("courses[{}].id", i), &course.id)?;
            validation::validate_non_empty_string(&format!("courses[{}].name", i), &course.name)?;
        }
        validation::validate_unique("courses.id", self.courses.iter().map(|c| c.id.as_str()))?;
        validation::validate_unique(
            "courses.name",
            self.courses.iter().map(|c| c.name.as_str()),
        )?;

        // 系所名稱允許重複，只檢查課程是否存在
        let known = self.course_names();
        for (i, department) in self.departments.iter().enumerate() {
            for course in &department.courses {
                validation::validate_known_value(
                    &format!("departments[{}].courses", i),
                    course,
                    &known,
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_seed_data() {
        let config = RegistryConfig::default();
        assert_eq!(config.courses.len(), 7);
        assert_eq!(config.courses[0].id, "C001");
        assert_eq!(config.courses[2].name, "Data Structures");
        assert_eq!(config.departments.len(), 2);
        assert_eq!(config.admission.min_student_age, 18);
        assert_eq!(config.admission.min_instructor_age, 30);
        assert!(!config.admission.reject_unparsed_age);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_content = r#"
[admission]
min_student_age = 16
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.admission.min_student_age, 16);
        assert_eq!(config.admission.min_instructor_age, 30);
        assert_eq!(config.courses.len(), 7);
        assert_eq!(config.departments.len(), 2);
    }

    #[test]
    fn test_parse_custom_seed_data() {
        let toml_content = r#"
[[courses]]
id = "M101"
name = "Calculus"

[[courses]]
id = "M201"
name = "Linear Algebra"

[[departments]]
name = "Mathematics"
courses = ["Calculus", "Linear Algebra"]
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.courses.len(), 2);
        assert_eq!(config.departments.len(), 1);
        assert_eq!(config.departments[0].courses, vec!["Calculus", "Linear Algebra"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CAMPUS_REGISTRY_TEST_DEPT", "Physics");

        let toml_content = r#"
[[departments]]
name = "${CAMPUS_REGISTRY_TEST_DEPT}"

[[departments]]
name = "${CAMPUS_REGISTRY_TEST_UNSET}"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.departments[0].name, "Physics");
        assert_eq!(config.departments[1].name, "${CAMPUS_REGISTRY_TEST_UNSET}");

        std::env::remove_var("CAMPUS_REGISTRY_TEST_DEPT");
    }

    #[test]
    fn test_duplicate_course_id_is_rejected() {
        let toml_content = r#"
[[courses]]
id = "C001"
name = "Calculus"

[[courses]]
id = "C001"
name = "Algebra"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("courses.id"));
    }

    #[test]
    fn test_unknown_department_course_is_rejected() {
        let toml_content = r#"
[[departments]]
name = "Arts"
courses = ["Pottery"]
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let toml_content = r#"
[admission]
min_instructor_age = 200
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = RegistryConfig::from_toml_str("[[courses]\nid = ");
        assert!(matches!(
            result,
            Err(RegistryError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[admission]
reject_unparsed_age = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = RegistryConfig::from_file(temp_file.path()).unwrap();
        assert!(config.admission.reject_unparsed_age);
    }
}
