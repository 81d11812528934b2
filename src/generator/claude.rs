use super::{base_command, run_with_prompt, Completion, Generator};
use crate::error::GeneratorError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

pub struct ClaudeGenerator {
    pub binary: PathBuf,
    pub model: String,
}

/// `--output-format json` envelope
#[derive(Deserialize)]
struct ClaudeOutput {
    result: String,
    #[serde(default)]
    is_error: bool,
}

fn parse_envelope(stdout: &str) -> Result<Completion, GeneratorError> {
    let envelope: ClaudeOutput = serde_json::from_str(stdout.trim())
        .map_err(|e| GeneratorError::ParseOutput(e.to_string()))?;
    if envelope.is_error {
        return Err(GeneratorError::ParseOutput(format!(
            "claude reported an error: {}",
            envelope.result
        )));
    }
    Ok(Completion {
        fragments: vec![envelope.result],
    })
}

#[async_trait]
impl Generator for ClaudeGenerator {
    fn name(&self) -> &'static str {
        "claude_cli"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, GeneratorError> {
        // Print mode reads the prompt from stdin when none is given on argv
        let mut cmd = base_command(&self.binary);
        cmd.arg("-p")
            .arg("--model")
            .arg(&self.model)
            .arg("--output-format")
            .arg("json");

        let output = run_with_prompt(cmd, &self.binary, prompt).await?;

        parse_envelope(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let completion =
            parse_envelope(r#"{"type":"result","result":"Looks safe.","session_id":"abc"}"#)
                .unwrap();
        assert_eq!(completion.fragments, vec!["Looks safe."]);
    }

    #[test]
    fn test_parse_envelope_error_flag() {
        let err = parse_envelope(r#"{"result":"rate limited","is_error":true}"#).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseOutput(_)));
    }

    #[test]
    fn test_parse_envelope_garbage() {
        assert!(parse_envelope("Usage: claude [options]").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_prompt_larger_than_arg_limit_goes_through_stdin() {
        let dir = tempfile::TempDir::new().unwrap();
        // Reports its argc and how many prompt bytes arrived on stdin
        let binary = super::super::fake_binary(
            &dir,
            "claude",
            r#"n=$(wc -c | tr -d ' ')
printf '{"result":"%s args, %s bytes"}\n' "$#" "$n""#,
        );
        let generator = ClaudeGenerator {
            binary,
            model: "sonnet".to_string(),
        };

        // Well past the 128 KiB single-argument limit on Linux
        let prompt = "x".repeat(200 * 1024);
        let completion = generator.complete(&prompt).await.unwrap();

        assert_eq!(
            completion.fragments,
            vec![format!("5 args, {} bytes", prompt.len())]
        );
    }
}
