//! Message selection and the final commit.

use tracing::info;

use crate::error::CommitError;
use crate::git::Vcs;
use crate::ui::Prompter;

/// Let the user choose one of `candidates`, in the order given.
pub fn select_message(
    prompter: &dyn Prompter,
    candidates: &[String],
) -> Result<String, CommitError> {
    if candidates.is_empty() {
        return Err(CommitError::NoCandidates);
    }
    Ok(prompter.select_message(candidates)?)
}

/// Commit the staged changes with `message` exactly as chosen.
pub fn commit_with_message(vcs: &dyn Vcs, message: &str) -> Result<(), CommitError> {
    println!("\n🚀 Committing: \"{}\"", message);
    vcs.commit(message)?;
    info!("Committed with message: {}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::ui::MockPrompter;

    #[test]
    fn test_empty_candidates_never_reach_prompter() {
        let prompter = MockPrompter::new();
        let err = select_message(&prompter, &[]).unwrap_err();
        assert!(matches!(err, CommitError::NoCandidates));
    }

    #[test]
    fn test_selection_returns_chosen_candidate() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_select_message()
            .withf(|candidates| candidates.len() == 2)
            .times(1)
            .returning(|candidates| Ok(candidates[1].clone()));

        let candidates = vec!["✨ feat: a".to_string(), "🐛 fix: b".to_string()];
        assert_eq!(select_message(&prompter, &candidates).unwrap(), "🐛 fix: b");
    }

    #[test]
    fn test_selection_failure_is_reported() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_select_message()
            .returning(|_| Err(PromptError::Terminal("not a tty".to_string())));

        let candidates = vec!["✨ feat: a".to_string()];
        let err = select_message(&prompter, &candidates).unwrap_err();
        assert!(matches!(err, CommitError::Selection(PromptError::Terminal(_))));
    }
}
