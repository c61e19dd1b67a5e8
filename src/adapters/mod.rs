// Adapters layer: concrete implementations of the prompter and console ports.

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedTerminal;
pub use terminal::LineTerminal;
