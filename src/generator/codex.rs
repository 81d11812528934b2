use super::{base_command, run_with_prompt, Completion, Generator};
use crate::error::GeneratorError;
use async_trait::async_trait;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub struct CodexGenerator {
    pub binary: PathBuf,
    pub model: String,
}

#[async_trait]
impl Generator for CodexGenerator {
    fn name(&self) -> &'static str {
        "codex_cli"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, GeneratorError> {
        // Final assistant message lands in this file; stdout carries JSON events
        let out_file = NamedTempFile::new()?;

        let mut cmd = base_command(&self.binary);
        cmd.arg("exec")
            .arg("--model")
            .arg(&self.model)
            .arg("--json")
            .arg("--output-last-message")
            .arg(out_file.path())
            // Read prompt from stdin
            .arg("-");

        run_with_prompt(cmd, &self.binary, prompt).await?;

        let message = tokio::fs::read_to_string(out_file.path()).await?;
        Ok(Completion {
            fragments: vec![message.trim_end().to_string()],
        })
    }
}
