//! Built-in instruction templates, one per question category.

use crate::types::{Category, PromptTemplate};

const NORMAL_INSTRUCTIONS: &str = "You are {{assistantName}}, a TA for {{className}} ({{classDescription}}). \
Answer step-by-step in up to three paragraphs if found in context; otherwise say \"I don't know.\"";

const MULTIPLE_CHOICE_INSTRUCTIONS: &str = "You are a precise TA in {{className}}. \
Construct a challenging multiple-choice question on {{question}} using only the context. \
Present options A–D, then include your answer and brief explanation inside \
<span style='display:none'>…</span>.";

const MULTIPLE_CHOICE_USER: &str = "Construct a challenging multiple-choice question on: {{question}}";

const ANSWER_CHECK_INSTRUCTIONS: &str = "You are a precise TA in {{className}}. \
Using only the context, tell me if the provided answer is correct. \
Just state the answer and rationale.";

/// The full template set used by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub normal: PromptTemplate,
    pub multiple_choice: PromptTemplate,
    pub answer_check: PromptTemplate,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            normal: PromptTemplate {
                instructions: NORMAL_INSTRUCTIONS.to_string(),
                user: "{{question}}".to_string(),
            },
            multiple_choice: PromptTemplate {
                instructions: MULTIPLE_CHOICE_INSTRUCTIONS.to_string(),
                user: MULTIPLE_CHOICE_USER.to_string(),
            },
            answer_check: PromptTemplate {
                instructions: ANSWER_CHECK_INSTRUCTIONS.to_string(),
                user: "{{question}}".to_string(),
            },
        }
    }
}

impl PromptTemplates {
    pub fn get(&self, category: Category) -> &PromptTemplate {
        match category {
            Category::Normal => &self.normal,
            Category::MultipleChoice => &self.multiple_choice,
            Category::AnswerCheck => &self.answer_check,
        }
    }

    pub fn set(&mut self, category: Category, template: PromptTemplate) {
        match category {
            Category::Normal => self.normal = template,
            Category::MultipleChoice => self.multiple_choice = template,
            Category::AnswerCheck => self.answer_check = template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_question_as_user_message() {
        let templates = PromptTemplates::default();
        assert_eq!(templates.get(Category::Normal).user, "{{question}}");
        assert_eq!(templates.get(Category::AnswerCheck).user, "{{question}}");
        assert!(templates
            .get(Category::MultipleChoice)
            .user
            .starts_with("Construct a challenging multiple-choice question on:"));
    }

    #[test]
    fn test_set_replaces_one_category() {
        let mut templates = PromptTemplates::default();
        let custom = PromptTemplate {
            instructions: "Custom".to_string(),
            user: "{{question}}".to_string(),
        };
        templates.set(Category::AnswerCheck, custom.clone());

        assert_eq!(templates.answer_check, custom);
        assert_eq!(templates.normal, PromptTemplates::default().normal);
    }
}
