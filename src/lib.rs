pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LineTerminal, ScriptedTerminal};
pub use config::{AdmissionConfig, RegistryConfig};
pub use self::core::{
    menu::{MenuAction, MenuState, Session},
    registry::Registry,
};
pub use utils::error::{RegistryError, Result};
