//! Text-generation backends used inside a worker process.

mod claude;
mod codex;
mod command;

pub use claude::ClaudeGenerator;
pub use codex::CodexGenerator;
pub use command::CommandGenerator;

use crate::config::{GeneratorConfig, Provider};
use crate::error::GeneratorError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Completion fragments in the order the backend emitted them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub fragments: Vec<String>,
}

impl Completion {
    pub fn text(&self) -> String {
        self.fragments.join("\n")
    }
}

#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Issue exactly one request for `prompt`
    async fn complete(&self, prompt: &str) -> Result<Completion, GeneratorError>;
}

/// Create a generator for the configured provider
pub fn create_generator(config: &GeneratorConfig) -> Arc<dyn Generator> {
    match config.provider {
        Provider::ClaudeCli => Arc::new(ClaudeGenerator {
            binary: config.claude_cli.binary.clone(),
            model: config.claude_cli.model.clone(),
        }),
        Provider::CodexCli => Arc::new(CodexGenerator {
            binary: config.codex_cli.binary.clone(),
            model: config.codex_cli.model.clone(),
        }),
        Provider::Command => Arc::new(CommandGenerator {
            program: config.command.program.clone(),
            args: config.command.args.clone(),
        }),
    }
}

/// Build a command, using PATH lookup for bare program names
fn base_command(binary: &Path) -> Command {
    let binary_str = binary.to_string_lossy();
    if binary_str.contains('/') || binary_str.contains('\\') {
        Command::new(binary)
    } else {
        Command::new(binary_str.as_ref())
    }
}

fn spawn_error(binary: &Path, source: std::io::Error) -> GeneratorError {
    GeneratorError::Spawn {
        program: binary.display().to_string(),
        source,
    }
}

/// Run `cmd` with `prompt` on stdin, draining stdout/stderr while it is written.
///
/// The prompt carries the whole code under review, so it never goes on argv.
async fn run_with_prompt(
    mut cmd: Command,
    binary: &Path,
    prompt: &str,
) -> Result<std::process::Output, GeneratorError> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| spawn_error(binary, e))?;

    let stdin = child.stdin.take();
    let prompt = prompt.as_bytes().to_vec();
    let write_prompt = async move {
        if let Some(mut stdin) = stdin {
            match stdin.write_all(&prompt).await {
                // Backend stopped reading early; its output still counts
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e),
                Ok(()) => {}
            }
        }
        Ok(())
    };

    let (written, output) = tokio::join!(write_prompt, child.wait_with_output());
    let output = output?;
    check_status(&output)?;
    written?;
    Ok(output)
}

fn check_status(output: &std::process::Output) -> Result<(), GeneratorError> {
    if output.status.success() {
        Ok(())
    } else {
        Err(GeneratorError::NonZeroExit {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Write an executable shell script standing in for a backend CLI
#[cfg(all(test, unix))]
fn fake_binary(dir: &tempfile::TempDir, name: &str, script: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_completion_text_joins_fragments() {
        let completion = Completion {
            fragments: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(completion.text(), "a\nb");
        assert_eq!(Completion::default().text(), "");
    }

    #[test]
    fn test_create_generator_follows_provider() {
        let mut config = Config::default().generator;
        assert_eq!(create_generator(&config).name(), "claude_cli");

        config.provider = Provider::CodexCli;
        assert_eq!(create_generator(&config).name(), "codex_cli");

        config.provider = Provider::Command;
        assert_eq!(create_generator(&config).name(), "command");
    }
}
