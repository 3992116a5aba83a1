//! Commit message generation via the chat-completion API.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::commit::diff::StagedDiff;
use crate::commit::prompt::build_prompt;
use crate::error::LlmError;
use crate::llm::{ChatCompletion, ChatRequest};

/// Output ceiling for the generation request.
pub const GENERATION_MAX_TOKENS: u32 = 300;

/// Leading `"<number>."` enumeration marker plus following whitespace.
static ENUMERATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("Invalid regex"));

/// Send `prompt` to the provider's generation model and return the raw reply.
///
/// Errors are returned as-is; there is no retry.
pub async fn generate(client: &dyn ChatCompletion, prompt: &str) -> Result<String, LlmError> {
    let provider = client.provider();
    let request = ChatRequest::user(provider.generation_model(), prompt, GENERATION_MAX_TOKENS);

    debug!("Commit prompt length: {} chars", prompt.len());
    let text = client.complete(&request).await?.into_text()?;
    debug!("Raw response: {}", text);

    Ok(text)
}

/// Split a model reply into candidate commit messages.
///
/// Each line is trimmed and stripped of a leading `"1. "` style marker; empty
/// lines are dropped. Anything else (unnumbered lines, stray punctuation)
/// passes through as a candidate. Order is preserved.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| ENUMERATION_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Build the prompt, ask the model, and parse its reply.
pub async fn suggest_messages(
    client: &dyn ChatCompletion,
    diff: &StagedDiff,
    user_context: Option<&str>,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_prompt(diff.text(), user_context);
    let raw = generate(client, &prompt).await?;
    let options = parse_options(&raw);
    debug!("Parsed {} commit message options", options.len());
    Ok(options)
}
