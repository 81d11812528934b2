use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unsupported config version {0} (expected 1)")]
    UnsupportedVersion(u32),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Prompt template for aspect '{0}' has no {{code}} placeholder")]
    MissingCodePlaceholder(String),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Execution timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AspectError {
    #[error("Invalid aspect identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Unknown aspect '{0}'")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("expected exactly one output line, found {0}")]
    LineCount(usize),

    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    Version(u32),

    #[error("record is for aspect '{found}', expected '{expected}'")]
    AspectMismatch { expected: String, found: String },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process failed with exit code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Failed to parse generator output: {0}")]
    ParseOutput(String),
}

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("At least one review aspect is required")]
    EmptyAspects,
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Review failed: {0}")]
    Review(#[from] ReviewError),
}
