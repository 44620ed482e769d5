//! Prompt types for the course tutor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of question a student asked, fixed once the question is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A plain course question
    Normal,
    /// A request to build a practice multiple-choice question (`m:` prefix)
    MultipleChoice,
    /// A request to check a proposed answer against the last context (`a:` prefix)
    AnswerCheck,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Normal,
        Category::MultipleChoice,
        Category::AnswerCheck,
    ];

    /// Stable identifier, also the override file stem under `.tutor/prompts/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::MultipleChoice => "multiple_choice",
            Category::AnswerCheck => "answer_check",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction and user-message templates for one category.
///
/// Templates use Handlebars syntax with the variables `className`,
/// `classDescription`, `assistantName` and `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// System instructions, rendered before the context block
    pub instructions: String,

    /// User message
    #[serde(default = "default_user_template")]
    pub user: String,
}

fn default_user_template() -> String {
    "{{question}}".to_string()
}

/// A system/user message pair ready to send to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Instructions followed by the context block
    pub system: String,

    /// The student's (possibly rewritten) request
    pub user: String,
}
