//! easycommit - suggests commit messages for staged changes and commits the chosen one.
//!
//! # Overview
//!
//! easycommit reads the staged diff from git, asks OpenAI or DeepSeek for a
//! handful of one-line commit messages, lets the user pick one from a list,
//! and runs `git commit` with it. The API key and provider are stored in
//! `~/.easycommit.json` after the first run.

pub mod app;
pub mod commit;
pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;

// Re-export commonly used types
pub use app::{Outcome, Pipeline, Session};
pub use config::{ConfigRecord, ConfigStore};
pub use credentials::{CredentialManager, CredentialState, Credentials};
pub use error::{AppError, CommitError, ConfigError, CredentialError, GitError, LlmError, PromptError};
pub use git::{GitCli, Vcs};
pub use llm::{ChatClient, ChatCompletion, Connector, Provider};
pub use ui::{CredentialRequest, Prompter, TerminalPrompter};
