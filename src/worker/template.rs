use crate::config::Config;
use crate::error::AspectError;
use regex::Regex;
use std::sync::OnceLock;

const SECURITY_PROMPT: &str = "Review the following code from a security perspective.\n\
Focus on vulnerabilities and security risks.\n\n\
```\n{code}\n```\n";

const PERFORMANCE_PROMPT: &str = "Review the following code from a performance perspective.\n\
Focus on efficiency and room for optimization.\n\n\
```\n{code}\n```\n";

const MAINTAINABILITY_PROMPT: &str = "Review the following code from a maintainability perspective.\n\
Focus on readability, naming, documentation, and testability.\n\n\
```\n{code}\n```\n";

const BUILTIN: &[(&str, &str, &str)] = &[
    ("security", "Security", SECURITY_PROMPT),
    ("performance", "Performance", PERFORMANCE_PROMPT),
    ("maintainability", "Maintainability", MAINTAINABILITY_PROMPT),
];

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("aspect identifier pattern is valid")
    })
}

/// Reject identifiers that could not round-trip through `--aspect=<name>`
pub fn validate_identifier(aspect: &str) -> Result<(), AspectError> {
    if identifier_pattern().is_match(aspect) {
        Ok(())
    } else {
        Err(AspectError::InvalidIdentifier(aspect.to_string()))
    }
}

/// Prompt variant for one aspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub aspect: String,
    pub title: String,
    body: String,
}

impl PromptTemplate {
    /// Look up the template for `aspect`. Config entries shadow built-ins.
    pub fn resolve(config: &Config, aspect: &str) -> Result<Self, AspectError> {
        validate_identifier(aspect)?;

        if let Some(custom) = config.aspects.get(aspect) {
            return Ok(Self {
                aspect: aspect.to_string(),
                title: custom.title.clone().unwrap_or_else(|| aspect.to_string()),
                body: custom.prompt.clone(),
            });
        }

        BUILTIN
            .iter()
            .find(|(name, _, _)| *name == aspect)
            .map(|(name, title, body)| Self {
                aspect: name.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            })
            .ok_or_else(|| AspectError::Unknown(aspect.to_string()))
    }

    pub fn render(&self, code: &str) -> String {
        self.body.replace("{code}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AspectConfig;

    #[test]
    fn test_builtin_templates_embed_code() {
        let config = Config::default();
        for aspect in ["security", "performance", "maintainability"] {
            let template = PromptTemplate::resolve(&config, aspect).unwrap();
            let prompt = template.render("def f(): pass");
            assert!(prompt.contains("```\ndef f(): pass\n```"));
            assert!(prompt.to_lowercase().contains(aspect));
        }
    }

    #[test]
    fn test_config_overrides_builtin() {
        let mut config = Config::default();
        config.aspects.insert(
            "security".to_string(),
            AspectConfig {
                title: Some("AppSec".to_string()),
                prompt: "Audit:\n{code}".to_string(),
            },
        );

        let template = PromptTemplate::resolve(&config, "security").unwrap();
        assert_eq!(template.title, "AppSec");
        assert_eq!(template.render("x = 1"), "Audit:\nx = 1");
    }

    #[test]
    fn test_custom_aspect_title_defaults_to_identifier() {
        let mut config = Config::default();
        config.aspects.insert(
            "error-handling".to_string(),
            AspectConfig {
                title: None,
                prompt: "Check error paths:\n{code}".to_string(),
            },
        );

        let template = PromptTemplate::resolve(&config, "error-handling").unwrap();
        assert_eq!(template.title, "error-handling");
        assert!(!template.render("x").contains("error-handling"));
    }

    #[test]
    fn test_unknown_aspect() {
        let err = PromptTemplate::resolve(&Config::default(), "style").unwrap_err();
        assert!(matches!(err, AspectError::Unknown(name) if name == "style"));
    }

    #[test]
    fn test_identifier_validation() {
        assert!(validate_identifier("security").is_ok());
        assert!(validate_identifier("error-handling_v2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("--help").is_err());
        assert!(validate_identifier("a b").is_err());
        assert!(validate_identifier("../etc").is_err());
    }
}
