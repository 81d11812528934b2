use crate::config::{Config, WorkerConfig};
use crate::error::AspectError;
use std::path::{Path, PathBuf};

use super::template::{validate_identifier, PromptTemplate};

const ASPECT_PLACEHOLDER: &str = "{aspect}";

/// Fully resolved launch line for one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn display_program(&self) -> String {
        self.program.display().to_string()
    }
}

/// Builds the launch line for each aspect job.
///
/// The default worker is this executable re-invoked as
/// `worker --aspect=<name> [--config <path>]`, so every aspect runs one of the
/// compiled-in prompt templates and nothing is written to disk. A configured
/// `worker.program` replaces it with any executable speaking the same
/// stdin/stdout protocol.
#[derive(Debug, Clone)]
pub struct WorkerFactory {
    program: PathBuf,
    args: Vec<String>,
    config_path: Option<PathBuf>,
    /// Present only for the built-in worker, whose aspects must resolve locally
    builtin: Option<Config>,
}

impl WorkerFactory {
    pub fn new(config: &Config, config_path: Option<&Path>) -> std::io::Result<Self> {
        let WorkerConfig { program, args, .. } = &config.worker;
        match program {
            Some(program) => Ok(Self {
                program: program.clone(),
                args: args.clone(),
                config_path: None,
                builtin: None,
            }),
            None => Ok(Self {
                program: std::env::current_exe()?,
                args: args.clone(),
                config_path: config_path.map(Path::to_path_buf),
                builtin: Some(config.clone()),
            }),
        }
    }

    pub fn command_for(&self, aspect: &str) -> Result<WorkerCommand, AspectError> {
        validate_identifier(aspect)?;
        if let Some(config) = &self.builtin {
            PromptTemplate::resolve(config, aspect)?;
        }

        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(ASPECT_PLACEHOLDER, aspect))
            .collect();

        if let Some(path) = &self.config_path {
            args.push("--config".to_string());
            args.push(path.display().to_string());
        }

        Ok(WorkerCommand {
            program: self.program.clone(),
            args,
        })
    }
}
