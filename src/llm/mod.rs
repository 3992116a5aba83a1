//! Chat-completion providers and the HTTP client that talks to them.

pub mod client;
pub mod provider;

pub use client::{
    ChatClient, ChatCompletion, ChatMessage, ChatRequest, Completion, Connector,
    REQUEST_TIMEOUT_SECS,
};
pub use provider::Provider;
