use crate::domain::ports::{Answer, Console, FieldKind, PromptField, Prompter};
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Line-oriented terminal: one answer per line of input.
///
/// Choices are shown as a numbered list and may be answered by number or by
/// name. An empty read (end of file) surfaces as [`RegistryError::InputClosed`].
#[derive(Debug)]
pub struct LineTerminal<R, W> {
    reader: R,
    writer: W,
}

impl LineTerminal<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    async fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Err(RegistryError::InputClosed);
        }
        // 只去掉換行，保留使用者輸入的空白
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

fn render(field: &PromptField) -> String {
    let mut text = format!("? {}", field.message);
    match &field.kind {
        FieldKind::Input { default } => {
            if let Some(default) = default {
                text.push_str(&format!(" ({})", default));
            }
            text.push(' ');
            return text;
        }
        FieldKind::Select { .. } => text.push('\n'),
        FieldKind::MultiSelect { .. } => text.push_str(" (comma separated, blank for none)\n"),
    }
    for (i, choice) in field.choices().iter().enumerate() {
        text.push_str(&format!("  {}) {}\n", i + 1, choice));
    }
    text.push_str("> ");
    text
}

#[async_trait]
impl<R, W> Prompter for LineTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(&mut self, field: &PromptField) -> Result<Answer> {
        loop {
            self.write_str(&render(field)).await?;
            let line = self.read_line().await?;
            match field.resolve(&line) {
                Ok(answer) => {
                    tracing::debug!("Field '{}' answered", field.name);
                    return Ok(answer);
                }
                Err(message) => {
                    tracing::debug!("Field '{}' rejected input: {}", field.name, message);
                    self.write_str(&format!(">> {}\n", message)).await?;
                }
            }
        }
    }
}

#[async_trait]
impl<R, W> Console for LineTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&mut self, text: &str) -> Result<()> {
        self.write_str(text).await?;
        self.write_str("\n").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(terminal: LineTerminal<&[u8], Vec<u8>>) -> String {
        String::from_utf8(terminal.into_writer()).unwrap()
    }

    #[test]
    fn test_render_input_with_default() {
        let field = PromptField::input("age", "Enter Student Age:").with_default("18");
        assert_eq!(render(&field), "? Enter Student Age: (18) ");
    }

    #[test]
    fn test_render_select() {
        let field = PromptField::select(
            "course",
            "Select Course:",
            vec!["Data Structures".to_string(), "Machine Learning".to_string()],
        );
        assert_eq!(
            render(&field),
            "? Select Course:\n  1) Data Structures\n  2) Machine Learning\n> "
        );
    }

    #[tokio::test]
    async fn test_prompt_strips_line_ending() {
        let mut terminal = LineTerminal::new(&b"Ava Smith\r\n"[..], Vec::new());
        let answer = terminal
            .prompt(&PromptField::input("name", "Enter Student Name:"))
            .await
            .unwrap();
        assert_eq!(answer, Answer::Text("Ava Smith".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_reasks_on_invalid_choice() {
        let mut terminal = LineTerminal::new(&b"9\nMachine Learning\n"[..], Vec::new());
        let field = PromptField::select(
            "course",
            "Select Course:",
            vec!["Data Structures".to_string(), "Machine Learning".to_string()],
        );
        let answer = terminal.prompt(&field).await.unwrap();
        assert_eq!(answer, Answer::Choice("Machine Learning".to_string()));

        let written = output(terminal);
        assert_eq!(written.matches("? Select Course:").count(), 2);
        assert!(written.contains(">> '9' is not one of the choices"));
    }

    #[tokio::test]
    async fn test_end_of_input_is_input_closed() {
        let mut terminal = LineTerminal::new(&b""[..], Vec::new());
        let result = terminal
            .prompt(&PromptField::input("name", "Enter Department Name:"))
            .await;
        assert!(matches!(result, Err(RegistryError::InputClosed)));
    }

    #[tokio::test]
    async fn test_emit_appends_newline() {
        let mut terminal = LineTerminal::new(&b""[..], Vec::new());
        terminal.emit("Department Added Successfully!").await.unwrap();
        assert_eq!(output(terminal), "Department Added Successfully!\n");
    }
}
