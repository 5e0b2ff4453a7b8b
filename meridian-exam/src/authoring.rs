use crate::models::{Exam, Question, QuestionKind};
use serde::Deserialize;

/// Marks awarded per question when building an exam.
const MARKS_PER_QUESTION: u32 = 10;

/// Longest accepted exam, in minutes. Keeps the countdown (duration times
/// sixty seconds) well inside u32 range.
const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Unvalidated exam submission from the authoring form.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamDraft {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub kind: QuestionKind,
}

impl ExamDraft {
    /// Validate the draft into an exam.
    ///
    /// Blank options are dropped before the option-count and correct-index
    /// checks; there is no partial save on failure.
    pub fn build(self) -> Result<Exam, AuthoringError> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        if title.is_empty() {
            return Err(AuthoringError::MissingTitle);
        }
        if description.is_empty() {
            return Err(AuthoringError::MissingDescription);
        }
        if self.duration_minutes == 0 {
            return Err(AuthoringError::ZeroDuration);
        }
        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(AuthoringError::DurationTooLong);
        }
        if self.questions.is_empty() {
            return Err(AuthoringError::NoQuestions);
        }

        let mut questions = Vec::with_capacity(self.questions.len());
        for (index, draft) in self.questions.into_iter().enumerate() {
            let number = index + 1;
            let prompt = draft.prompt.trim().to_string();
            if prompt.is_empty() {
                return Err(AuthoringError::EmptyPrompt { number });
            }
            let options: Vec<String> = draft
                .options
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if options.len() < 2 {
                return Err(AuthoringError::TooFewOptions { number });
            }
            if draft.correct_answer >= options.len() {
                return Err(AuthoringError::CorrectAnswerOutOfRange { number });
            }
            questions.push(Question {
                id: meridian_core::ids::new_entity_id(),
                prompt,
                options,
                correct_answer: draft.correct_answer,
                kind: draft.kind,
            });
        }

        let total_marks = questions.len() as u32 * MARKS_PER_QUESTION;
        Ok(Exam {
            id: meridian_core::ids::new_entity_id(),
            title,
            description,
            duration_minutes: self.duration_minutes,
            questions,
            total_marks,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    #[error("Exam title is required")]
    MissingTitle,

    #[error("Exam description is required")]
    MissingDescription,

    #[error("Exam duration must be at least one minute")]
    ZeroDuration,

    #[error("Exam duration must not exceed 1440 minutes")]
    DurationTooLong,

    #[error("At least one question is required")]
    NoQuestions,

    #[error("Question {number} has no text")]
    EmptyPrompt { number: usize },

    #[error("Question {number} needs at least 2 options")]
    TooFewOptions { number: usize },

    #[error("Question {number} marks a correct answer outside its options")]
    CorrectAnswerOutOfRange { number: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ExamDraft {
        ExamDraft {
            title: "Rust Basics".to_string(),
            description: "Ownership and borrowing".to_string(),
            duration_minutes: 30,
            questions: vec![
                QuestionDraft {
                    prompt: "Which keyword declares an immutable binding?".to_string(),
                    options: vec!["let".to_string(), "mut".to_string(), "const fn".to_string()],
                    correct_answer: 0,
                    kind: QuestionKind::MultipleChoice,
                },
                QuestionDraft {
                    prompt: "Shadowing is allowed in Rust.".to_string(),
                    options: vec!["True".to_string(), "False".to_string()],
                    correct_answer: 0,
                    kind: QuestionKind::TrueFalse,
                },
            ],
        }
    }

    #[test]
    fn test_valid_draft_builds_exam() {
        let exam = draft().build().unwrap();
        assert_eq!(exam.questions.len(), 2);
        assert_eq!(exam.total_marks, 20);
        assert_ne!(exam.questions[0].id, exam.questions[1].id);
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(d.build(), Err(AuthoringError::MissingTitle)));
    }

    #[test]
    fn test_duration_outside_bounds_rejected() {
        let mut d = draft();
        d.duration_minutes = 0;
        assert!(matches!(d.build(), Err(AuthoringError::ZeroDuration)));

        let mut d = draft();
        d.duration_minutes = u32::MAX;
        assert!(matches!(d.build(), Err(AuthoringError::DurationTooLong)));

        let mut d = draft();
        d.duration_minutes = MAX_DURATION_MINUTES;
        assert!(d.build().is_ok());
    }

    #[test]
    fn test_no_questions_rejected() {
        let mut d = draft();
        d.questions.clear();
        assert!(matches!(d.build(), Err(AuthoringError::NoQuestions)));
    }

    #[test]
    fn test_blank_options_are_dropped_before_count_check() {
        let mut d = draft();
        d.questions[0].options = vec![
            "let".to_string(),
            "   ".to_string(),
            String::new(),
        ];
        assert!(matches!(
            d.build(),
            Err(AuthoringError::TooFewOptions { number: 1 })
        ));
    }

    #[test]
    fn test_correct_answer_must_address_kept_option() {
        let mut d = draft();
        // Index 2 pointed at a real option, but a blank one is dropped and
        // the index now falls outside the kept list.
        d.questions[0].options = vec!["let".to_string(), " ".to_string(), "mut".to_string()];
        d.questions[0].correct_answer = 2;
        assert!(matches!(
            d.build(),
            Err(AuthoringError::CorrectAnswerOutOfRange { number: 1 })
        ));
    }
}
