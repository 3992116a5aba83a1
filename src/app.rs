//! The end-to-end run: credentials, staged diff, suggestions, selection, commit.

use tracing::{debug, info};

use crate::commit::{collect_staged_diff, commit_with_message, select_message, suggest_messages};
use crate::config::ConfigStore;
use crate::credentials::CredentialManager;
use crate::error::AppError;
use crate::git::Vcs;
use crate::llm::Connector;
use crate::ui::Prompter;

/// Per-run settings taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub reset_requested: bool,
    /// Free text passed through to the prompt.
    pub user_context: Option<String>,
}

impl Session {
    /// Build a session from the non-flag CLI tokens, joined with spaces.
    pub fn new(reset_requested: bool, context_words: &[String]) -> Self {
        let joined = context_words.join(" ");
        let user_context = (!joined.trim().is_empty()).then_some(joined);
        Self {
            reset_requested,
            user_context,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A commit was created with this message.
    Committed(String),
    /// Nothing was staged; the model was never called.
    NothingStaged,
    /// The model's reply held no usable lines.
    NoOptions,
}

/// Collaborators for one run.
pub struct Pipeline<'a> {
    pub store: &'a ConfigStore,
    pub prompter: &'a dyn Prompter,
    pub vcs: &'a dyn Vcs,
    pub connector: &'a Connector,
}

impl Pipeline<'_> {
    /// Run every step in order. Prompts and git calls block the calling
    /// thread; only the API requests are awaited.
    pub async fn run(&self, session: &Session) -> Result<Outcome, AppError> {
        let (credentials, client) = CredentialManager::new(self.store, self.prompter)
            .run(session.reset_requested, self.connector)
            .await?;

        let diff = collect_staged_diff(self.vcs).map_err(AppError::Diff)?;
        if diff.is_empty() {
            println!("⚠️ No changes to commit. Use \"git add\" first.");
            return Ok(Outcome::NothingStaged);
        }

        debug!("Generating suggestions with {}", credentials.provider);
        let options = suggest_messages(&client, &diff, session.user_context.as_deref())
            .await
            .map_err(AppError::Generation)?;

        if options.is_empty() {
            println!("⚠️ The model returned no commit message options. Try again.");
            return Ok(Outcome::NoOptions);
        }

        self.prompter.clear();
        let selected = select_message(self.prompter, &options)?;
        commit_with_message(self.vcs, &selected)?;

        info!("Run finished");
        Ok(Outcome::Committed(selected))
    }
}
