use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use std::fmt;

pub type FieldFilter = fn(&str) -> String;
pub type FieldValidator = fn(&str) -> std::result::Result<(), String>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// 自由文字，空白輸入時使用預設值
    Input { default: Option<String> },
    /// 從清單中選一個
    Select { choices: Vec<String> },
    /// 從清單中選零到多個
    MultiSelect { choices: Vec<String> },
}

/// One field of an interactive form.
///
/// Input answers go through `filter` first and then `validate`; a validation
/// failure makes the prompter ask again.
#[derive(Clone)]
pub struct PromptField {
    pub name: &'static str,
    pub message: String,
    pub kind: FieldKind,
    pub filter: Option<FieldFilter>,
    pub validate: Option<FieldValidator>,
}

impl fmt::Debug for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptField")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("filter", &self.filter.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Choice(String),
    Choices(Vec<String>),
}

impl PromptField {
    pub fn input(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: FieldKind::Input { default: None },
            filter: None,
            validate: None,
        }
    }

    pub fn select(name: &'static str, message: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: FieldKind::Select { choices },
            filter: None,
            validate: None,
        }
    }

    pub fn multi_select(
        name: &'static str,
        message: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            name,
            message: message.into(),
            kind: FieldKind::MultiSelect { choices },
            filter: None,
            validate: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        if let FieldKind::Input { default: slot } = &mut self.kind {
            *slot = Some(default.into());
        }
        self
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_validator(mut self, validate: FieldValidator) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn choices(&self) -> &[String] {
        match &self.kind {
            FieldKind::Input { .. } => &[],
            FieldKind::Select { choices } | FieldKind::MultiSelect { choices } => choices,
        }
    }

    /// Turns one raw line of user input into an answer.
    ///
    /// Choices may be given by 1-based position or by label (case-insensitive).
    /// Multi-select entries are comma separated and kept in the order typed.
    /// `Err` carries the message to show before asking again.
    pub fn resolve(&self, raw: &str) -> std::result::Result<Answer, String> {
        match &self.kind {
            FieldKind::Input { default } => {
                let captured = match default {
                    Some(default) if raw.is_empty() => default.as_str(),
                    _ => raw,
                };
                let value = match self.filter {
                    Some(filter) => filter(captured),
                    None => captured.to_string(),
                };
                if let Some(validate) = self.validate {
                    validate(&value)?;
                }
                Ok(Answer::Text(value))
            }
            FieldKind::Select { choices } => {
                resolve_choice(choices, raw).map(|label| Answer::Choice(label.to_string()))
            }
            FieldKind::MultiSelect { choices } => {
                if raw.trim().is_empty() {
                    return Ok(Answer::Choices(Vec::new()));
                }
                raw.split(',')
                    .map(|part| resolve_choice(choices, part).map(str::to_string))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(Answer::Choices)
            }
        }
    }
}

fn resolve_choice<'a>(choices: &'a [String], raw: &str) -> std::result::Result<&'a str, String> {
    let wanted = raw.trim();
    if let Ok(position) = wanted.parse::<usize>() {
        if let Some(choice) = position.checked_sub(1).and_then(|i| choices.get(i)) {
            return Ok(choice.as_str());
        }
    }
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(wanted))
        .map(String::as_str)
        .ok_or_else(|| {
            format!(
                "'{}' is not one of the choices (1-{} or a listed name)",
                wanted,
                choices.len()
            )
        })
}

impl Answer {
    pub fn into_text(self, field: &str) -> Result<String> {
        match self {
            Answer::Text(value) | Answer::Choice(value) => Ok(value),
            Answer::Choices(_) => Err(unexpected(field, "a list of choices")),
        }
    }

    pub fn into_choices(self, field: &str) -> Result<Vec<String>> {
        match self {
            Answer::Choices(values) => Ok(values),
            Answer::Text(_) | Answer::Choice(_) => Err(unexpected(field, "a single value")),
        }
    }
}

fn unexpected(field: &str, got: &str) -> RegistryError {
    RegistryError::PromptError {
        field: field.to_string(),
        message: format!("prompter returned {}", got),
    }
}

/// Interactive input. One call per field, in the order the form declares them.
#[async_trait]
pub trait Prompter: Send {
    async fn prompt(&mut self, field: &PromptField) -> Result<Answer>;
}

/// Plain text output.
#[async_trait]
pub trait Console: Send {
    async fn emit(&mut self, text: &str) -> Result<()>;
}

/// A terminal that can both ask and tell.
pub trait Interaction: Prompter + Console {}

impl<T: Prompter + Console + ?Sized> Interaction for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<String> {
        vec![
            "Data Structures".to_string(),
            "Machine Learning".to_string(),
            "Web Development".to_string(),
        ]
    }

    #[test]
    fn test_input_uses_default_on_empty() {
        let field = PromptField::input("age", "Enter Student Age:").with_default("18");
        assert_eq!(field.resolve(""), Ok(Answer::Text("18".to_string())));
        assert_eq!(field.resolve("21"), Ok(Answer::Text("21".to_string())));
        // 只有空字串才套用預設值
        assert_eq!(field.resolve(" "), Ok(Answer::Text(" ".to_string())));
    }

    #[test]
    fn test_filter_runs_before_validation() {
        let field = PromptField::input("salary", "Enter Instructor Salary:")
            .with_filter(|raw| raw.trim().to_string())
            .with_validator(|value| {
                if value.contains(' ') {
                    Err("no spaces".to_string())
                } else {
                    Ok(())
                }
            });
        assert_eq!(field.resolve("  100  "), Ok(Answer::Text("100".to_string())));
        assert!(field.resolve("1 0").is_err());
    }

    #[test]
    fn test_select_by_position_or_label() {
        let field = PromptField::select("course", "Select Course:", courses());
        assert_eq!(
            field.resolve("2"),
            Ok(Answer::Choice("Machine Learning".to_string()))
        );
        assert_eq!(
            field.resolve("web development"),
            Ok(Answer::Choice("Web Development".to_string()))
        );
        assert!(field.resolve("0").is_err());
        assert!(field.resolve("4").is_err());
        assert!(field.resolve("Astrology").is_err());
    }

    #[test]
    fn test_multi_select_keeps_typed_order_and_duplicates() {
        let field = PromptField::multi_select("courses", "Select Courses:", courses());
        assert_eq!(field.resolve(""), Ok(Answer::Choices(vec![])));
        assert_eq!(
            field.resolve("3, 1, Web Development"),
            Ok(Answer::Choices(vec![
                "Web Development".to_string(),
                "Data Structures".to_string(),
                "Web Development".to_string(),
            ]))
        );
        assert!(field.resolve("1,,2").is_err());
    }

    #[test]
    fn test_answer_shape_mismatch_is_prompt_error() {
        let err = Answer::Text("x".to_string()).into_choices("courses").unwrap_err();
        assert!(matches!(err, RegistryError::PromptError { .. }));
    }
}
