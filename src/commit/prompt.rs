//! Prompt construction for AI-generated commit messages.

/// Number of commit message options requested from the model.
pub const OPTION_COUNT: usize = 5;

/// Build the prompt asking for [`OPTION_COUNT`] numbered one-line options.
pub fn build_prompt(diff: &str, user_context: Option<&str>) -> String {
    build_prompt_with_count(diff, user_context, OPTION_COUNT)
}

/// Build the prompt asking for `count` numbered one-line options.
///
/// The diff and the user's context are inserted verbatim.
pub fn build_prompt_with_count(diff: &str, user_context: Option<&str>, count: usize) -> String {
    let context_section = match user_context {
        Some(context) if !context.trim().is_empty() => {
            format!("\nAdditional context: \"{context}\"\n")
        }
        _ => String::new(),
    };

    format!(
        r#"You are an assistant that generates clear and concise commit messages.
- Start with an emoji (e.g., 🐛, ✨, 🔥)
- Write in English
- Include prefixes like "feat:", "fix:" when applicable
{context_section}
Generate {count} options based on these changes:

{diff}

Only list the numbered messages (1. 2. 3...)."#
    )
}
