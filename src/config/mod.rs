mod defaults;
mod types;

pub use defaults::{default_aspects, SCHEMA_VERSION};
pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::collections::HashMap;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_aspects: default_aspects(),
            concurrency: None,
            worker: WorkerConfig::default(),
            generator: GeneratorConfig::default(),
            aspects: HashMap::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SCHEMA_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        if self.concurrency == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be at least 1 (omit for unbounded)".to_string(),
            });
        }

        if self.worker.timeout_sec == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "worker.timeout_sec",
                reason: "must be at least 1 (omit for no timeout)".to_string(),
            });
        }

        if self.worker.args.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "worker.args",
                reason: "must not be empty".to_string(),
            });
        }

        for (name, aspect) in &self.aspects {
            if !aspect.prompt.contains("{code}") {
                return Err(ConfigError::MissingCodePlaceholder(name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.default_aspects,
            vec!["security", "performance", "maintainability"]
        );
        assert!(config.concurrency.is_none());
        assert!(config.worker.timeout_sec.is_none());
    }

    #[test]
    fn test_load_partial_yaml_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "generator:\n  provider: command\n  command:\n    program: sh\n    args: [\"-c\", \"cat\"]\naspects:\n  docs:\n    prompt: \"Check docs:\\n{{code}}\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.generator.provider, Provider::Command);
        assert_eq!(config.generator.command.args, vec!["-c", "cat"]);
        assert_eq!(config.worker.args, vec!["worker", "--aspect={aspect}"]);
        assert!(config.aspects.contains_key("docs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/aspectrev.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            concurrency: Some(0),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "concurrency",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_template_without_code() {
        let mut config = Config::default();
        config.aspects.insert(
            "docs".to_string(),
            AspectConfig {
                title: None,
                prompt: "Review this".to_string(),
            },
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCodePlaceholder(name)) if name == "docs"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_version() {
        let config = Config {
            version: 2,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedVersion(2))
        ));
    }
}
