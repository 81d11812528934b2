use crate::error::GeneratorError;
use crate::generator::Generator;
use tracing::debug;

use super::{PromptTemplate, WorkerRecord};

/// Worker-side body: one prompt, one generator request, one record.
pub async fn review_aspect(
    template: &PromptTemplate,
    generator: &dyn Generator,
    code: &str,
) -> Result<WorkerRecord, GeneratorError> {
    let prompt = template.render(code);
    debug!(
        "Requesting {} review from {} ({} bytes of prompt)",
        template.title,
        generator.name(),
        prompt.len()
    );

    // An empty review is still a completed review
    let completion = generator.complete(&prompt).await?;
    Ok(WorkerRecord::new(&template.aspect, completion.text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::Completion;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        fragments: Vec<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Generator for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<Completion, GeneratorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Completion {
                fragments: self.fragments.iter().map(|f| f.to_string()).collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_fragments_joined_in_order() {
        let template = PromptTemplate::resolve(&Config::default(), "security").unwrap();
        let generator = Scripted {
            fragments: vec!["first", "second", "third"],
            prompts: Mutex::new(Vec::new()),
        };

        let record = review_aspect(&template, &generator, "eval(input())")
            .await
            .unwrap();
        assert_eq!(record.review, "first\nsecond\nthird");
        assert_eq!(record.aspect.as_deref(), Some("security"));

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("eval(input())"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_empty_review() {
        let template = PromptTemplate::resolve(&Config::default(), "performance").unwrap();
        let generator = Scripted {
            fragments: vec![],
            prompts: Mutex::new(Vec::new()),
        };

        let record = review_aspect(&template, &generator, "x").await.unwrap();
        assert_eq!(record.review, "");
        assert_eq!(record.aspect.as_deref(), Some("performance"));
    }
}
