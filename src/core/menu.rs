use crate::config::{AdmissionConfig, RegistryConfig};
use crate::core::handlers::{self, Outcome};
use crate::core::registry::Registry;
use crate::domain::ports::{Console, Interaction, PromptField};
use crate::utils::error::{RegistryError, Result};

const BANNER: [&str; 2] = [
    "\n\t=============================== ---*** W E L C O M E ***--- ===============================\n",
    "\n\t------------------------------- UNIVERSITY MANAGEMENT SYSTEM -------------------------------\n",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddStudent,
    AddInstructor,
    AddDepartment,
    ListDepartments,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::AddStudent,
        MenuAction::AddInstructor,
        MenuAction::AddDepartment,
        MenuAction::ListDepartments,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::AddStudent => "Add Student",
            MenuAction::AddInstructor => "Add Instructor",
            MenuAction::AddDepartment => "Add Department",
            MenuAction::ListDepartments => "List Departments and Courses",
            MenuAction::Exit => "Exit",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == label)
    }

    fn prompt_field() -> PromptField {
        PromptField::select(
            "option",
            "Choose an Option:",
            Self::ALL.iter().map(|action| action.label().to_string()).collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Stopped,
}

/// Owns the registry for the lifetime of one interactive run.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
    admission: AdmissionConfig,
    state: MenuState,
}

impl Session {
    pub fn new(registry: Registry, admission: AdmissionConfig) -> Self {
        Self {
            registry,
            admission,
            state: MenuState::Running,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(Registry::seeded(config), config.admission.clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Runs one action to completion.
    pub async fn dispatch<I: Interaction + ?Sized>(
        &mut self,
        action: MenuAction,
        io: &mut I,
    ) -> Result<Option<Outcome>> {
        tracing::debug!("Dispatching '{}'", action.label());
        let outcome = match action {
            MenuAction::AddStudent => {
                handlers::add_student(&mut self.registry, &self.admission, io).await?
            }
            MenuAction::AddInstructor => {
                handlers::add_instructor(&mut self.registry, &self.admission, io).await?
            }
            MenuAction::AddDepartment => handlers::add_department(&mut self.registry, io).await?,
            MenuAction::ListDepartments => handlers::list_departments(&self.registry, io).await?,
            MenuAction::Exit => {
                self.state = MenuState::Stopped;
                return Ok(None);
            }
        };
        Ok(Some(outcome))
    }

    /// 顯示選單一次並執行所選動作
    pub async fn step<I: Interaction + ?Sized>(&mut self, io: &mut I) -> Result<MenuState> {
        let choice = io
            .prompt(&MenuAction::prompt_field())
            .await?
            .into_text("option")?;

        match MenuAction::from_label(&choice) {
            Some(action) => {
                self.dispatch(action, io).await?;
            }
            None => tracing::debug!("Unrecognized menu choice '{}', asking again", choice),
        }
        Ok(self.state)
    }

    /// Loops until Exit is chosen or input ends.
    pub async fn run<I: Interaction + ?Sized>(&mut self, io: &mut I) -> Result<()> {
        tracing::info!("🚀 Menu loop started");
        while self.state == MenuState::Running {
            match self.step(io).await {
                Ok(_) => {}
                Err(RegistryError::InputClosed) => {
                    tracing::info!("Input closed, stopping menu loop");
                    self.state = MenuState::Stopped;
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            "🏁 Menu loop stopped ({} students, {} instructors, {} departments)",
            self.registry.students().len(),
            self.registry.instructors().len(),
            self.registry.departments().len()
        );
        Ok(())
    }
}

pub async fn print_banner<C: Console + ?Sized>(console: &mut C) -> Result<()> {
    for line in BANNER {
        console.emit(line).await?;
    }
    Ok(())
}
