//! API key resolution and validation.
//!
//! Runs as a small state machine:
//!
//! ```text
//! Start ──► HasKey ─────────────┐
//!   │                           ▼
//!   └────► NeedsKey ──► HasKey ─► Validating ──► Ready
//! ```
//!
//! `Ready` holds the client that passed validation, so the caller reuses it.
//!
//! Any failure along the way (prompt aborted, key not saved, key rejected by
//! the provider) ends the machine with a [`CredentialError`].

use std::fmt;

use tracing::{debug, info};

use crate::config::ConfigStore;
use crate::error::CredentialError;
use crate::llm::{ChatClient, ChatCompletion, ChatRequest, Connector, Provider};
use crate::ui::Prompter;

/// Output ceiling for the credential check request.
pub const VALIDATION_MAX_TOKENS: u32 = 1;

/// Content of the credential check request.
const VALIDATION_PROMPT: &str = "Test";

/// A resolved provider + key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub provider: Provider,
    pub api_key: String,
}

// The key never ends up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// States of the credential state machine.
#[derive(Debug, Clone)]
pub enum CredentialState {
    Start,
    HasKey(Credentials),
    NeedsKey,
    Validating(Credentials),
    Ready(Credentials, ChatClient),
}

impl CredentialState {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialState::Start => "start",
            CredentialState::HasKey(_) => "has-key",
            CredentialState::NeedsKey => "needs-key",
            CredentialState::Validating(_) => "validating",
            CredentialState::Ready(..) => "ready",
        }
    }
}

/// Decides whether a usable key exists, asks for one if not, and checks it.
pub struct CredentialManager<'a> {
    store: &'a ConfigStore,
    prompter: &'a dyn Prompter,
}

impl<'a> CredentialManager<'a> {
    pub fn new(store: &'a ConfigStore, prompter: &'a dyn Prompter) -> Self {
        Self { store, prompter }
    }

    /// Leave `Start`: clear stored credentials on reset, then look for a key.
    pub fn start(&self, reset_requested: bool) -> CredentialState {
        if reset_requested {
            let removed = self.store.clear();
            debug!("Reset requested, config removed: {}", removed);
            println!("🔄 Configuration removed. A new key will be requested.");
            return CredentialState::NeedsKey;
        }

        match self.store.load() {
            Some(record) => CredentialState::HasKey(Credentials {
                provider: record.provider,
                api_key: record.api_key,
            }),
            None => CredentialState::NeedsKey,
        }
    }

    /// Leave `NeedsKey`: ask the user for a provider and key, then persist them.
    pub fn acquire(&self) -> Result<Credentials, CredentialError> {
        let request = self.prompter.request_credentials()?;

        self.store
            .save(&request.api_key, request.provider)
            .map_err(CredentialError::SaveFailed)?;
        println!("✅ Settings saved successfully!");

        Ok(Credentials {
            provider: request.provider,
            api_key: request.api_key,
        })
    }

    /// Drive the machine to `Ready`, returning the credentials and a client
    /// already proven to accept them.
    pub async fn run(
        &self,
        reset_requested: bool,
        connector: &Connector,
    ) -> Result<(Credentials, ChatClient), CredentialError> {
        let mut state = CredentialState::Start;

        loop {
            debug!("Credential state: {}", state.name());
            state = match state {
                CredentialState::Start => self.start(reset_requested),
                CredentialState::NeedsKey => CredentialState::HasKey(self.acquire()?),
                CredentialState::HasKey(credentials) => CredentialState::Validating(credentials),
                CredentialState::Validating(credentials) => {
                    let client = connector
                        .connect(credentials.provider, &credentials.api_key)
                        .map_err(CredentialError::Validation)?;
                    println!("Preparing commit...");
                    validate(&client).await?;
                    CredentialState::Ready(credentials, client)
                }
                CredentialState::Ready(credentials, client) => {
                    info!("Using {} credentials", credentials.provider);
                    return Ok((credentials, client));
                }
            };
        }
    }
}

/// Confirm the key works with a one-token request before spending a real prompt on it.
pub async fn validate(client: &dyn ChatCompletion) -> Result<(), CredentialError> {
    let provider = client.provider();
    let request = ChatRequest::user(
        provider.validation_model(),
        VALIDATION_PROMPT,
        VALIDATION_MAX_TOKENS,
    );

    client
        .complete(&request)
        .await
        .map_err(CredentialError::Validation)?;

    debug!("{} accepted the API key", provider);
    Ok(())
}
