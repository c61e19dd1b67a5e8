use crate::domain::ports::{Answer, Console, PromptField, Prompter};
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;

/// In-memory terminal fed from a fixed list of raw answers.
///
/// Answers go through the same [`PromptField::resolve`] as a real terminal, so
/// an invalid entry is recorded in the output and the next answer is used.
/// Running out of answers reports [`RegistryError::InputClosed`].
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    responses: VecDeque<String>,
    output: Vec<String>,
    asked: Vec<&'static str>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Everything emitted, one entry per `emit` call or re-ask message.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Field names in the order they were prompted, re-asks included.
    pub fn asked(&self) -> &[&'static str] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

#[async_trait]
impl Prompter for ScriptedTerminal {
    async fn prompt(&mut self, field: &PromptField) -> Result<Answer> {
        loop {
            self.asked.push(field.name);
            let raw = self.responses.pop_front().ok_or(RegistryError::InputClosed)?;
            match field.resolve(&raw) {
                Ok(answer) => return Ok(answer),
                Err(message) => self.output.push(format!(">> {}", message)),
            }
        }
    }
}

#[async_trait]
impl Console for ScriptedTerminal {
    async fn emit(&mut self, text: &str) -> Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }
}
