use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Aspects reviewed when the caller does not name any
    #[serde(default = "default_aspects")]
    pub default_aspects: Vec<String>,

    /// Max workers alive at once; unset means one process per aspect, all at once
    #[serde(default)]
    pub concurrency: Option<usize>,

    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Extra prompt templates, or overrides of the built-in ones, keyed by aspect
    #[serde(default)]
    pub aspects: HashMap<String, AspectConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct WorkerConfig {
    /// Worker executable; unset means the running aspectrev binary
    #[serde(default)]
    pub program: Option<PathBuf>,

    /// Worker arguments; `{aspect}` is replaced with the aspect identifier
    #[serde(default = "default_worker_args")]
    pub args: Vec<String>,

    /// Per-worker timeout; unset means workers may run indefinitely
    #[serde(default)]
    pub timeout_sec: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: default_worker_args(),
            timeout_sec: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub provider: Provider,

    #[serde(default)]
    pub claude_cli: ClaudeCliConfig,

    #[serde(default)]
    pub codex_cli: CodexCliConfig,

    #[serde(default)]
    pub command: CommandConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    ClaudeCli,
    CodexCli,
    Command,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::ClaudeCli => write!(f, "claude_cli"),
            Provider::CodexCli => write!(f, "codex_cli"),
            Provider::Command => write!(f, "command"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ClaudeCliConfig {
    #[serde(default = "default_claude_binary")]
    pub binary: PathBuf,

    #[serde(default = "default_claude_model")]
    pub model: String,
}

impl Default for ClaudeCliConfig {
    fn default() -> Self {
        Self {
            binary: default_claude_binary(),
            model: default_claude_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CodexCliConfig {
    #[serde(default = "default_codex_binary")]
    pub binary: PathBuf,

    #[serde(default = "default_codex_model")]
    pub model: String,
}

impl Default for CodexCliConfig {
    fn default() -> Self {
        Self {
            binary: default_codex_binary(),
            model: default_codex_model(),
        }
    }
}

/// Any program that reads a prompt on stdin and prints the completion on stdout
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CommandConfig {
    #[serde(default = "default_command_program")]
    pub program: PathBuf,

    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: default_command_program(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AspectConfig {
    /// Display name used in worker logs; defaults to the aspect identifier
    #[serde(default)]
    pub title: Option<String>,

    /// Prompt body; must contain `{code}`
    pub prompt: String,
}
