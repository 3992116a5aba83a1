//! AI-generated commit messages: staged diff in, chosen commit out.

pub mod diff;
pub mod executor;
pub mod message;
pub mod prompt;

pub use diff::{StagedDiff, collect_staged_diff};
pub use executor::{commit_with_message, select_message};
pub use message::{GENERATION_MAX_TOKENS, generate, parse_options, suggest_messages};
pub use prompt::{OPTION_COUNT, build_prompt, build_prompt_with_count};
