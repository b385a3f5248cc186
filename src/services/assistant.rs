//! External assistant invocation. The assistant is a locally installed AI
//! CLI run once per request; its stdout is treated as an opaque string.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::models::settings::AppSettings;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("AI assistant is disabled in settings")]
    Disabled,

    #[error("Assistant binary not found: {0}")]
    NotFound(String),

    #[error("Assistant timed out after {0}s")]
    Timeout(u64),

    #[error("Assistant exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("Assistant returned no output")]
    EmptyOutput,

    #[error("Failed to run assistant: {0}")]
    Io(#[from] std::io::Error),
}

/// Successful invoker result. Failures are rendered by
/// [`crate::error::AppError`] as `{success: false, error, code}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub success: bool,
    pub content: String,
}

impl AssistantReply {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Runs one prompt. Returns the reply text as the assistant wrote it.
    async fn complete(&self, settings: &AppSettings, prompt: &str) -> Result<String, AssistantError>;
}

/// Runs the provider's CLI as a child process.
#[derive(Debug, Clone)]
pub struct CliAssistant {
    timeout: Duration,
    binary_override: Option<PathBuf>,
}

impl CliAssistant {
    pub fn new(timeout: Duration, binary_override: Option<PathBuf>) -> Self {
        Self {
            timeout,
            binary_override,
        }
    }

    fn command(&self, settings: &AppSettings, prompt: &str) -> (String, Command) {
        let provider = settings.ai_provider;
        let binary = self
            .binary_override
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| provider.binary().to_string());

        let mut cmd = Command::new(&binary);
        cmd.args(provider.args(prompt))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(key) = &settings.api_key {
            cmd.env(provider.api_key_env(), key);
        }
        (binary, cmd)
    }
}

#[async_trait]
impl Assistant for CliAssistant {
    async fn complete(&self, settings: &AppSettings, prompt: &str) -> Result<String, AssistantError> {
        if !settings.ai_enabled {
            return Err(AssistantError::Disabled);
        }

        let (binary, mut cmd) = self.command(settings, prompt);
        tracing::debug!(
            provider = settings.ai_provider.as_str(),
            binary = %binary,
            prompt_len = prompt.len(),
            "Invoking assistant"
        );

        let child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssistantError::NotFound(binary.clone()),
            _ => AssistantError::Io(e),
        })?;

        // The child is killed when the future is dropped on timeout.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AssistantError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                binary = %binary,
                code = ?output.status.code(),
                "Assistant exited with failure"
            );
            return Err(AssistantError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        let content = String::from_utf8_lossy(&output.stdout).into_owned();
        if content.trim().is_empty() {
            return Err(AssistantError::EmptyOutput);
        }
        Ok(content)
    }
}
