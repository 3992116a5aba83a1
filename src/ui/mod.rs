//! Interactive terminal prompts.
//!
//! The pipeline only talks to the [`Prompter`] trait, so tests can answer
//! prompts without a terminal.

use console::Term;
use dialoguer::{Password, Select};
use tracing::debug;

use crate::error::PromptError;
use crate::llm::Provider;

/// Number of commit message options visible at once.
pub const SELECT_PAGE_SIZE: usize = 5;

/// Answers to the first-run credential questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    pub provider: Provider,
    pub api_key: String,
}

/// The interactive collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask for a provider and a non-empty API key.
    fn request_credentials(&self) -> Result<CredentialRequest, PromptError>;

    /// Let the user pick one of `candidates`. Callers never pass an empty slice.
    fn select_message(&self, candidates: &[String]) -> Result<String, PromptError>;

    /// Clear the screen before showing the options.
    fn clear(&self) {}
}

/// [`Prompter`] backed by dialoguer on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn request_credentials(&self) -> Result<CredentialRequest, PromptError> {
        let labels: Vec<&str> = Provider::ALL.iter().map(|p| p.label()).collect();
        let index = Select::new()
            .with_prompt("Choose the AI API provider")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(terminal_error)?;
        let provider = Provider::ALL[index];

        let api_key = Password::new()
            .with_prompt(format!("Enter your {} API Key", provider))
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.is_empty() {
                    Err("⚠️ The key cannot be empty!")
                } else {
                    Ok(())
                }
            })
            .interact()
            .map_err(terminal_error)?;

        Ok(CredentialRequest { provider, api_key })
    }

    fn select_message(&self, candidates: &[String]) -> Result<String, PromptError> {
        let index = Select::new()
            .with_prompt("Choose the commit message")
            .items(candidates)
            .default(0)
            .max_length(SELECT_PAGE_SIZE)
            .interact()
            .map_err(terminal_error)?;

        candidates.get(index).cloned().ok_or(PromptError::Cancelled)
    }

    fn clear(&self) {
        // Not fatal: the list still renders below the old output.
        if let Err(e) = Term::stdout().clear_screen() {
            debug!("Failed to clear the screen: {}", e);
        }
    }
}

fn terminal_error(err: dialoguer::Error) -> PromptError {
    PromptError::Terminal(err.to_string())
}
