//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use easycommit::config::CONFIG_FILE_NAME;
use easycommit::error::{GitError, PromptError};
use easycommit::git::Vcs;
use easycommit::ui::{CredentialRequest, Prompter};
use easycommit::{ConfigStore, Provider};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A config store inside `dir`, never touching the real home directory.
pub fn temp_store(dir: &tempfile::TempDir) -> ConfigStore {
    ConfigStore::new(dir.path().join(CONFIG_FILE_NAME))
}

/// An OpenAI-style chat-completion response carrying `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// An OpenAI-style error body.
pub fn error_body(message: &str) -> Value {
    json!({ "error": { "message": message, "type": "invalid_request_error" } })
}

/// Mount the one-token credential check, expected `times` times.
pub async fn mount_validation(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "max_tokens": 1 })))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Mount the suggestion request, expected `times` times.
pub async fn mount_generation(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "max_tokens": 300 })))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// In-memory [`Vcs`] that records commits.
pub struct FakeVcs {
    diff: String,
    fail_commit: bool,
    pub commits: Mutex<Vec<String>>,
}

impl FakeVcs {
    pub fn with_diff(diff: &str) -> Self {
        Self {
            diff: diff.to_string(),
            fail_commit: false,
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_commit(diff: &str) -> Self {
        Self {
            fail_commit: true,
            ..Self::with_diff(diff)
        }
    }

    pub fn committed(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }
}

impl Vcs for FakeVcs {
    fn staged_diff(&self) -> Result<String, GitError> {
        Ok(self.diff.clone())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        if self.fail_commit {
            return Err(GitError::Failed {
                operation: "commit".to_string(),
                code: Some(1),
                stderr: "pre-commit hook failed".to_string(),
            });
        }
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Scripted [`Prompter`] that counts how often it was asked.
pub struct FakePrompter {
    credentials: Option<CredentialRequest>,
    pick: usize,
    pub credential_requests: AtomicUsize,
    pub shown: Mutex<Vec<Vec<String>>>,
}

impl FakePrompter {
    /// Picks option `pick`; fails if asked for credentials.
    pub fn picking(pick: usize) -> Self {
        Self {
            credentials: None,
            pick,
            credential_requests: AtomicUsize::new(0),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Answers the credential questions, then picks the first option.
    pub fn answering(provider: Provider, api_key: &str) -> Self {
        Self {
            credentials: Some(CredentialRequest {
                provider,
                api_key: api_key.to_string(),
            }),
            ..Self::picking(0)
        }
    }

    pub fn credential_request_count(&self) -> usize {
        self.credential_requests.load(Ordering::SeqCst)
    }

    pub fn shown_lists(&self) -> Vec<Vec<String>> {
        self.shown.lock().unwrap().clone()
    }
}

impl Prompter for FakePrompter {
    fn request_credentials(&self) -> Result<CredentialRequest, PromptError> {
        self.credential_requests.fetch_add(1, Ordering::SeqCst);
        self.credentials.clone().ok_or(PromptError::Cancelled)
    }

    fn select_message(&self, candidates: &[String]) -> Result<String, PromptError> {
        self.shown.lock().unwrap().push(candidates.to_vec());
        candidates.get(self.pick).cloned().ok_or(PromptError::Cancelled)
    }
}

/// A throwaway git repository driven through the `git` binary.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = temp_test_dir();
        let repo = Self { dir };
        repo.git(&["init", "--quiet"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository, panicking on failure. Returns stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file and stage it.
    pub fn stage_file(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).expect("Failed to write file");
        self.git(&["add", name]);
    }

    /// Subject of the latest commit.
    pub fn last_subject(&self) -> String {
        self.git(&["log", "-1", "--format=%s"]).trim_end().to_string()
    }
}
