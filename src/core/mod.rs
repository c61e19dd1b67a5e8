pub mod handlers;
pub mod menu;
pub mod registry;

pub use crate::domain::model::{Course, CourseKey, Department, Instructor, Person, Student};
pub use crate::domain::ports::{Answer, Console, Interaction, PromptField, Prompter};
pub use crate::utils::error::Result;
