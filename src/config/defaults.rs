use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

pub fn default_version() -> u32 {
    SCHEMA_VERSION
}

pub fn default_aspects() -> Vec<String> {
    vec![
        "security".to_string(),
        "performance".to_string(),
        "maintainability".to_string(),
    ]
}

pub fn default_worker_args() -> Vec<String> {
    vec!["worker".to_string(), "--aspect={aspect}".to_string()]
}

pub fn default_claude_binary() -> PathBuf {
    // Check common install location first
    if let Some(home) = std::env::var_os("HOME") {
        let local_path = PathBuf::from(home).join(".claude/local/claude");
        if local_path.exists() {
            return local_path;
        }
    }
    // Fall back to PATH lookup
    PathBuf::from("claude")
}

pub fn default_claude_model() -> String {
    "sonnet".to_string()
}

pub fn default_codex_binary() -> PathBuf {
    PathBuf::from("codex")
}

pub fn default_codex_model() -> String {
    "gpt-4.1".to_string()
}

pub fn default_command_program() -> PathBuf {
    PathBuf::from("cat")
}
