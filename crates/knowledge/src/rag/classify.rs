//! Question classification and query rewriting.

use tutor_core::CourseInfo;
use tutor_llm::{ChatMessage, Judge};
use tutor_prompt::Category;

/// Split a raw question into its category and body.
///
/// A case-insensitive `m:` or `a:` prefix selects the category and is
/// removed along with surrounding whitespace. Anything else is a normal
/// question, returned trimmed.
pub fn parse_question(raw: &str) -> (Category, String) {
    let trimmed = raw.trim();

    let category = match trimmed.get(..2).map(|p| p.to_ascii_lowercase()) {
        Some(prefix) if prefix == "m:" => Category::MultipleChoice,
        Some(prefix) if prefix == "a:" => Category::AnswerCheck,
        _ => return (Category::Normal, trimmed.to_string()),
    };

    (category, trimmed[2..].trim().to_string())
}

/// Framing added to questions judged to be about the syllabus.
pub fn syllabus_rewrite(class_name: &str, question: &str) -> String {
    format!("I may be asking about the syllabus for {}. {}", class_name, question)
}

/// Framing that carries the previous turn's context into a follow-up.
pub fn follow_up_rewrite(previous_context: &str, question: &str) -> String {
    format!(
        "I have a follow-up. Previous context:\n{}\nMy question: {}",
        previous_context, question
    )
}

/// Yes/no judgments that decide how a normal question is rewritten.
///
/// Both judgments are best-effort: a failed call counts as "no" and the
/// question goes ahead unrewritten.
#[derive(Clone)]
pub struct QuestionClassifier {
    judge: Judge,
    course: CourseInfo,
}

impl QuestionClassifier {
    pub fn new(judge: Judge, course: CourseInfo) -> Self {
        Self { judge, course }
    }

    pub async fn is_syllabus_question(&self, question: &str) -> bool {
        let prompt = format!(
            "This question is from a student in {} taught by {} with the help of {}. \
             The class is {}. Is this question likely about syllabus details? \
             Answer Yes or No: {}",
            self.course.class_name,
            self.course.professor,
            self.course.assistants,
            self.course.class_description,
            question
        );
        self.judge.ask_or(vec![ChatMessage::user(prompt)], false).await
    }

    pub async fn is_follow_up(&self, question: &str, previous_context: &str) -> bool {
        let prompt = format!(
            "Consider this new question: {}. The previous question and response was: {}. \
             Would it be helpful to include the previous context? Answer Yes or No.",
            question, previous_context
        );
        self.judge.ask_or(vec![ChatMessage::user(prompt)], false).await
    }

    /// Apply syllabus then follow-up framing to a normal question body.
    pub async fn rewrite(&self, question: &str, previous_context: Option<&str>) -> String {
        let mut effective = question.to_string();

        if self.is_syllabus_question(question).await {
            tracing::info!("Detected syllabus-related question");
            effective = syllabus_rewrite(&self.course.class_name, &effective);
        }

        if let Some(previous) = previous_context {
            if self.is_follow_up(question, previous).await {
                tracing::info!("Detected follow-up question");
                effective = follow_up_rewrite(previous, &effective);
            }
        }

        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_choice_prefix() {
        assert_eq!(
            parse_question("m: explain recursion"),
            (Category::MultipleChoice, "explain recursion".to_string())
        );
        assert_eq!(
            parse_question("M:explain recursion"),
            (Category::MultipleChoice, "explain recursion".to_string())
        );
    }

    #[test]
    fn test_answer_check_prefix() {
        assert_eq!(
            parse_question("A: Is O(n log n) correct for merge sort?"),
            (
                Category::AnswerCheck,
                "Is O(n log n) correct for merge sort?".to_string()
            )
        );
    }

    #[test]
    fn test_normal_question_is_trimmed() {
        assert_eq!(
            parse_question("  What is the late policy?  "),
            (Category::Normal, "What is the late policy?".to_string())
        );
    }

    #[test]
    fn test_prefix_must_lead() {
        let (category, body) = parse_question("What does m: mean?");
        assert_eq!(category, Category::Normal);
        assert_eq!(body, "What does m: mean?");
    }

    #[test]
    fn test_prefix_only() {
        assert_eq!(parse_question("a:"), (Category::AnswerCheck, String::new()));
    }

    #[test]
    fn test_multibyte_start() {
        assert_eq!(
            parse_question("é tudo?"),
            (Category::Normal, "é tudo?".to_string())
        );
    }

    #[test]
    fn test_rewrites() {
        assert_eq!(
            syllabus_rewrite("CS 101", "When is the final?"),
            "I may be asking about the syllabus for CS 101. When is the final?"
        );
        assert_eq!(
            follow_up_rewrite("Recursion needs a base case.", "Why?"),
            "I have a follow-up. Previous context:\nRecursion needs a base case.\nMy question: Why?"
        );
    }
}
