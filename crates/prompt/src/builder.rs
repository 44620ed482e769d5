//! Prompt builder for rendering templates and attaching context.

use crate::templates::PromptTemplates;
use crate::types::{Category, PromptSpec};
use handlebars::Handlebars;
use serde::Serialize;
use tutor_core::{AppError, AppResult, CourseInfo};

/// Separator between the rendered instructions and the context block.
pub const CONTEXT_HEADER: &str = "\n\nContext:\n";

#[derive(Serialize)]
struct TemplateVars<'a> {
    #[serde(rename = "className")]
    class_name: &'a str,
    #[serde(rename = "classDescription")]
    class_description: &'a str,
    #[serde(rename = "assistantName")]
    assistant_name: &'a str,
    question: &'a str,
}

/// Renders the system/user message pair for a question.
///
/// Templates are compiled once at construction so a broken override fails
/// at startup rather than mid-conversation.
pub struct PromptBuilder {
    registry: Handlebars<'static>,
}

impl PromptBuilder {
    /// Compile a template set.
    pub fn new(templates: &PromptTemplates) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Plain text, not HTML
        registry.register_escape_fn(handlebars::no_escape);

        for category in Category::ALL {
            let template = templates.get(category);
            registry
                .register_template_string(&instructions_key(category), &template.instructions)
                .map_err(|e| {
                    AppError::Prompt(format!(
                        "Failed to register '{}' instructions: {}",
                        category, e
                    ))
                })?;
            registry
                .register_template_string(&user_key(category), &template.user)
                .map_err(|e| {
                    AppError::Prompt(format!(
                        "Failed to register '{}' user template: {}",
                        category, e
                    ))
                })?;
        }

        Ok(Self { registry })
    }

    /// Compile the built-in templates.
    pub fn with_defaults() -> AppResult<Self> {
        Self::new(&PromptTemplates::default())
    }

    /// Build the prompt for a question.
    ///
    /// The system message is the rendered instructions, then `CONTEXT_HEADER`,
    /// then `context` verbatim (which may be empty).
    pub fn build(
        &self,
        category: Category,
        course: &CourseInfo,
        question: &str,
        context: &str,
    ) -> AppResult<PromptSpec> {
        let vars = TemplateVars {
            class_name: &course.class_name,
            class_description: &course.class_description,
            assistant_name: &course.assistant_name,
            question,
        };

        let instructions = self.render(&instructions_key(category), &vars)?;
        let user = self.render(&user_key(category), &vars)?;

        tracing::debug!(
            "Built '{}' prompt ({} instruction chars, {} context chars)",
            category,
            instructions.len(),
            context.len()
        );

        Ok(PromptSpec {
            system: format!("{}{}{}", instructions, CONTEXT_HEADER, context),
            user,
        })
    }

    fn render(&self, name: &str, vars: &TemplateVars<'_>) -> AppResult<String> {
        self.registry
            .render(name, vars)
            .map_err(|e| AppError::Prompt(format!("Failed to render template '{}': {}", name, e)))
    }
}

fn instructions_key(category: Category) -> String {
    format!("{}.instructions", category.as_str())
}

fn user_key(category: Category) -> String {
    format!("{}.user", category.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptTemplate;

    fn course() -> CourseInfo {
        CourseInfo {
            class_name: "CS 101".to_string(),
            professor: "Dr. Rivera".to_string(),
            assistants: "Ana".to_string(),
            class_description: "Intro to programming".to_string(),
            instructions: String::new(),
            assistant_name: "Ada".to_string(),
        }
    }

    #[test]
    fn test_normal_prompt() {
        let builder = PromptBuilder::with_defaults().unwrap();
        let spec = builder
            .build(Category::Normal, &course(), "What is the late policy?", "Late work loses 10%.")
            .unwrap();

        assert_eq!(
            spec.system,
            "You are Ada, a TA for CS 101 (Intro to programming). Answer step-by-step in up to \
             three paragraphs if found in context; otherwise say \"I don't know.\"\n\nContext:\n\
             Late work loses 10%."
        );
        assert_eq!(spec.user, "What is the late policy?");
    }

    #[test]
    fn test_multiple_choice_prompt() {
        let builder = PromptBuilder::with_defaults().unwrap();
        let spec = builder
            .build(Category::MultipleChoice, &course(), "explain recursion", "ctx")
            .unwrap();

        assert!(spec.system.starts_with("You are a precise TA in CS 101."));
        assert!(spec.system.contains("question on explain recursion using only the context"));
        assert!(spec.system.contains("<span style='display:none'>"));
        assert!(spec.system.ends_with("\n\nContext:\nctx"));
        assert_eq!(
            spec.user,
            "Construct a challenging multiple-choice question on: explain recursion"
        );
    }

    #[test]
    fn test_answer_check_prompt_with_empty_context() {
        let builder = PromptBuilder::with_defaults().unwrap();
        let question = "Is O(n log n) correct for merge sort?";
        let spec = builder
            .build(Category::AnswerCheck, &course(), question, "")
            .unwrap();

        assert!(spec.system.contains("tell me if the provided answer is correct"));
        assert!(spec.system.ends_with("\n\nContext:\n"));
        assert_eq!(spec.user, question);
    }

    #[test]
    fn test_question_is_not_interpreted_as_template() {
        let builder = PromptBuilder::with_defaults().unwrap();
        let spec = builder
            .build(Category::Normal, &course(), "What does {{x}} & <b> mean?", "")
            .unwrap();
        assert_eq!(spec.user, "What does {{x}} & <b> mean?");
    }

    #[test]
    fn test_invalid_override_fails_at_construction() {
        let mut templates = PromptTemplates::default();
        templates.set(
            Category::Normal,
            PromptTemplate {
                instructions: "{{#if}}broken".to_string(),
                user: "{{question}}".to_string(),
            },
        );
        assert!(matches!(
            PromptBuilder::new(&templates),
            Err(AppError::Prompt(_))
        ));
    }
}
