use super::{base_command, run_with_prompt, Completion, Generator};
use crate::error::GeneratorError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Generic backend: prompt on stdin, each stdout line is one fragment
pub struct CommandGenerator {
    pub program: PathBuf,
    pub args: Vec<String>,
}

#[async_trait]
impl Generator for CommandGenerator {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, GeneratorError> {
        let mut cmd = base_command(&self.program);
        cmd.args(&self.args);

        let output = run_with_prompt(cmd, &self.program, prompt).await?;

        let fragments = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        Ok(Completion { fragments })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandGenerator {
        CommandGenerator {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[tokio::test]
    async fn test_lines_become_fragments() {
        let completion = sh("cat >/dev/null; echo one; echo two")
            .complete("prompt")
            .await
            .unwrap();
        assert_eq!(completion.fragments, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_prompt_on_stdin() {
        let completion = sh("tr a-z A-Z").complete("check me").await.unwrap();
        assert_eq!(completion.text(), "CHECK ME");
    }

    #[tokio::test]
    async fn test_nonzero_exit() {
        let err = sh("cat >/dev/null; echo quota >&2; exit 2")
            .complete("prompt")
            .await
            .unwrap_err();
        match err {
            GeneratorError::NonZeroExit { code, stderr } => {
                assert_eq!(code, 2);
                assert_eq!(stderr.trim(), "quota");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
