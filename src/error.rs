//! Error types for easycommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::llm::Provider;

/// Errors from reading or writing the local configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove config file {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}

/// Errors from the interactive prompt collaborator.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt was cancelled")]
    Cancelled,

    #[error("Terminal interaction failed: {0}")]
    Terminal(String),
}

/// Errors from chat-completion API calls.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to reach {provider} API: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API request timed out after {secs} seconds")]
    Timeout { provider: Provider, secs: u64 },

    #[error("{provider} API returned HTTP {status}: {message}")]
    Status {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("{provider} API returned an unexpected response: {reason}")]
    MalformedResponse { provider: Provider, reason: String },
}

impl LlmError {
    /// HTTP 402: the account has run out of credit.
    pub fn is_billing(&self) -> bool {
        matches!(self, LlmError::Status { status: 402, .. })
    }

    pub fn provider(&self) -> Provider {
        match self {
            LlmError::Transport { provider, .. }
            | LlmError::Timeout { provider, .. }
            | LlmError::Status { provider, .. }
            | LlmError::MalformedResponse { provider, .. } => *provider,
        }
    }
}

/// Errors from resolving and validating API credentials.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to save API key: {0}")]
    SaveFailed(#[source] ConfigError),

    #[error("Failed to read API key: {0}")]
    Prompt(#[from] PromptError),

    #[error("API key check failed: {0}")]
    Validation(#[source] LlmError),
}

/// Errors from the system `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH. Install git and try again.")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed{}: {stderr}", code.map(|c| format!(" with code {c}")).unwrap_or_default())]
    Failed {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from selecting and committing a message.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No commit message options to choose from")]
    NoCandidates,

    #[error("Failed to choose a commit message: {0}")]
    Selection(#[from] PromptError),

    #[error("Failed to create commit: {0}")]
    Git(#[from] GitError),
}

/// Top-level pipeline failure. Every variant ends the run with exit code 1.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Failed to read staged changes: {0}")]
    Diff(#[source] GitError),

    #[error("Error generating commit messages: {0}")]
    Generation(#[source] LlmError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl AppError {
    /// Follow-up lines shown to the user after the error message.
    pub fn hints(&self) -> Vec<String> {
        match self {
            AppError::Credentials(CredentialError::Validation(err)) => {
                let mut hints = Vec::new();
                if err.is_billing() {
                    hints.push(format!(
                        "👉 Check your balance at: {}",
                        err.provider().billing_url()
                    ));
                }
                hints.push(r#"🔧 Tip: Use "--reset-key" to set up a new API key."#.to_string());
                hints
            }
            _ => Vec::new(),
        }
    }
}
