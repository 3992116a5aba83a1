//! Supported chat-completion providers and their endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Deepseek,
}

impl Provider {
    /// Every provider, in the order offered to the user.
    pub const ALL: [Provider; 2] = [Provider::OpenAi, Provider::Deepseek];

    /// Tag stored in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Deepseek => "deepseek",
        }
    }

    /// Parse a config-file tag.
    pub fn from_tag(tag: &str) -> Option<Provider> {
        Provider::ALL.into_iter().find(|p| p.as_str() == tag)
    }

    /// Human-readable label for the provider choice list.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI (GPT-4)",
            Provider::Deepseek => "DeepSeek Chat",
        }
    }

    /// Base URL for OpenAI-compatible chat-completion requests.
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Deepseek => "https://api.deepseek.com/v1",
        }
    }

    /// Cheap model used for the one-token credential check.
    pub fn validation_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Deepseek => "deepseek-chat",
        }
    }

    /// Model used to generate commit message options.
    pub fn generation_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4",
            Provider::Deepseek => "deepseek-chat",
        }
    }

    /// Where to check the account balance after an HTTP 402.
    pub fn billing_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://platform.openai.com/account/billing",
            Provider::Deepseek => "https://platform.deepseek.com",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
