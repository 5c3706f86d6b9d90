//! Prompt seam between the booking questions and the terminal.

use dialoguer::{Confirm, FuzzySelect, Input, theme::ColorfulTheme};
use std::io;
use thiserror::Error;

/// Failure while asking the user a question.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("could not read answer: {0}")]
    Io(#[source] io::Error),

    /// An accepted answer could not be converted into a booking field.
    #[error("invalid answer: {0}")]
    Answer(#[from] resy_common::ValidationError),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::Interrupted => PromptError::Interrupted,
            _ => PromptError::Io(e),
        }
    }
}

impl From<dialoguer::Error> for PromptError {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            dialoguer::Error::IO(e) => e.into(),
        }
    }
}

/// Asks questions and shows messages.
///
/// Implementations block until the user answers.
pub trait Prompter {
    /// Yes/no question. With `default` of `None` an explicit answer is required.
    fn confirm(&mut self, message: &str, default: Option<bool>) -> Result<bool, PromptError>;

    /// Single line of free text.
    fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// Several lines of free text joined by `\n`. May be empty.
    fn multiline(&mut self, message: &str) -> Result<String, PromptError>;

    /// Picks one of `items`, returning its index.
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Shows a message.
    fn say(&mut self, message: &str);

    /// Shows a problem with the last answer.
    fn warn(&mut self, message: &str);
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: Option<bool>) -> Result<bool, PromptError> {
        let mut prompt = Confirm::with_theme(&self.theme).with_prompt(message);
        if let Some(default) = default {
            prompt = prompt.default(default);
        }
        Ok(prompt.interact()?)
    }

    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?)
    }

    fn multiline(&mut self, message: &str) -> Result<String, PromptError> {
        eprintln!("{message} (one per line, empty line to finish)");
        let mut lines = Vec::new();
        loop {
            let line = Input::<String>::with_theme(&self.theme)
                .with_prompt(">")
                .allow_empty(true)
                .interact_text()?;
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        Ok(FuzzySelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn say(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("✗ {message}");
    }
}
