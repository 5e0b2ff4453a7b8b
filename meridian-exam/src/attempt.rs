use crate::models::{Exam, ExamResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AttemptStatus {
    NotStarted,
    InProgress,
    Submitted,
}

/// One student's pass through an exam.
///
/// The attempt is a pure state machine: the countdown advances only through
/// `tick`, so tests drive simulated time directly and the one-second
/// scheduling lives with the caller.
#[derive(Debug, Clone)]
pub struct ExamAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    exam: Exam,
    status: AttemptStatus,
    remaining_seconds: u32,
    answers: HashMap<Uuid, usize>,
}

// Saturating so that an out-of-range duration degrades to a long countdown
// instead of overflowing. Authoring caps the duration before an exam is
// stored, but attempts accept any exam value.
fn duration_seconds(exam: &Exam) -> u32 {
    exam.duration_minutes.saturating_mul(60)
}

impl ExamAttempt {
    pub fn new(exam: Exam, user_id: Uuid) -> Self {
        Self {
            id: meridian_core::ids::new_entity_id(),
            user_id,
            remaining_seconds: duration_seconds(&exam),
            exam,
            status: AttemptStatus::NotStarted,
            answers: HashMap::new(),
        }
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn start(&mut self) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::NotStarted {
            return Err(AttemptError::AlreadyStarted);
        }
        self.status = AttemptStatus::InProgress;
        Ok(())
    }

    /// Record a selection for a question, overwriting any prior choice.
    pub fn select_answer(
        &mut self,
        question_id: Uuid,
        option_index: usize,
    ) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::InProgress {
            return Err(AttemptError::NotInProgress);
        }
        let question = self
            .exam
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(AttemptError::UnknownQuestion(question_id))?;
        if option_index >= question.options.len() {
            return Err(AttemptError::OptionOutOfRange {
                question_id,
                option_index,
            });
        }
        self.answers.insert(question_id, option_index);
        Ok(())
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero forces submission with whatever answers were captured
    /// and returns the result; ticks outside InProgress are ignored.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<ExamResult> {
        if self.status != AttemptStatus::InProgress {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            tracing::info!(attempt_id = %self.id, "time expired, auto-submitting");
            return Some(self.finalize(now));
        }
        None
    }

    /// Submit explicitly. Double submission is rejected.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<ExamResult, AttemptError> {
        match self.status {
            AttemptStatus::NotStarted => Err(AttemptError::NotInProgress),
            AttemptStatus::Submitted => Err(AttemptError::AlreadySubmitted),
            AttemptStatus::InProgress => Ok(self.finalize(now)),
        }
    }

    fn finalize(&mut self, now: DateTime<Utc>) -> ExamResult {
        self.status = AttemptStatus::Submitted;
        let score = self
            .exam
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct_answer))
            .count() as u32;
        let elapsed_seconds = duration_seconds(&self.exam) - self.remaining_seconds;
        ExamResult {
            id: meridian_core::ids::new_entity_id(),
            exam_id: self.exam.id,
            user_id: self.user_id,
            answers: self.answers.clone(),
            score,
            total_questions: self.exam.questions.len() as u32,
            completed_at: now,
            time_taken_minutes: f64::from(elapsed_seconds) / 60.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("Attempt already started")]
    AlreadyStarted,

    #[error("Attempt is not in progress")]
    NotInProgress,

    #[error("Attempt already submitted")]
    AlreadySubmitted,

    #[error("Question not part of this exam: {0}")]
    UnknownQuestion(Uuid),

    #[error("Option {option_index} out of range for question {question_id}")]
    OptionOutOfRange { question_id: Uuid, option_index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionKind};

    fn exam_with_questions(count: usize) -> Exam {
        let questions = (0..count)
            .map(|i| Question {
                id: meridian_core::ids::new_entity_id(),
                prompt: format!("Question {}", i + 1),
                options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                correct_answer: i % 3,
                kind: QuestionKind::MultipleChoice,
            })
            .collect();
        Exam {
            id: meridian_core::ids::new_entity_id(),
            title: "Sample".to_string(),
            description: "Sample exam".to_string(),
            duration_minutes: 30,
            questions,
            total_marks: count as u32 * 10,
        }
    }

    fn started(exam: Exam) -> ExamAttempt {
        let mut attempt = ExamAttempt::new(exam, meridian_core::ids::new_entity_id());
        attempt.start().unwrap();
        attempt
    }

    #[test]
    fn test_score_counts_matching_answers_only() {
        let exam = exam_with_questions(5);
        let question_ids: Vec<Uuid> = exam.questions.iter().map(|q| q.id).collect();
        let correct: Vec<usize> = exam.questions.iter().map(|q| q.correct_answer).collect();
        let mut attempt = started(exam);

        // Answer the first three correctly, the fourth wrongly, leave the
        // fifth blank.
        for i in 0..3 {
            attempt.select_answer(question_ids[i], correct[i]).unwrap();
        }
        attempt
            .select_answer(question_ids[3], (correct[3] + 1) % 3)
            .unwrap();

        let result = attempt.submit(Utc::now()).unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.percentage(), 60.0);
    }

    #[test]
    fn test_zero_answers_scores_zero() {
        let mut attempt = started(exam_with_questions(4));
        let result = attempt.submit(Utc::now()).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 4);
    }

    #[test]
    fn test_reselection_overwrites_prior_choice() {
        let exam = exam_with_questions(1);
        let question_id = exam.questions[0].id;
        let correct = exam.questions[0].correct_answer;
        let mut attempt = started(exam);

        attempt.select_answer(question_id, (correct + 1) % 3).unwrap();
        attempt.select_answer(question_id, correct).unwrap();
        assert_eq!(attempt.answered_count(), 1);

        let result = attempt.submit(Utc::now()).unwrap();
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_out_of_range_option_rejected() {
        let exam = exam_with_questions(1);
        let question_id = exam.questions[0].id;
        let mut attempt = started(exam);
        assert!(matches!(
            attempt.select_answer(question_id, 3),
            Err(AttemptError::OptionOutOfRange { .. })
        ));
        assert!(matches!(
            attempt.select_answer(meridian_core::ids::new_entity_id(), 0),
            Err(AttemptError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn test_countdown_expiry_forces_submission() {
        let exam = exam_with_questions(2);
        let duration_seconds = exam.duration_minutes * 60;
        let question_id = exam.questions[0].id;
        let correct = exam.questions[0].correct_answer;
        let mut attempt = started(exam);
        attempt.select_answer(question_id, correct).unwrap();

        let now = Utc::now();
        let mut result = None;
        for _ in 0..duration_seconds {
            if let Some(r) = attempt.tick(now) {
                result = Some(r);
                break;
            }
        }

        let result = result.expect("countdown should have expired");
        assert_eq!(attempt.status(), AttemptStatus::Submitted);
        assert_eq!(attempt.remaining_seconds(), 0);
        assert_eq!(result.score, 1);
        assert_eq!(result.time_taken_minutes, 30.0);

        // Further ticks are ignored after submission.
        assert!(attempt.tick(now).is_none());
    }

    #[test]
    fn test_double_submission_rejected() {
        let mut attempt = started(exam_with_questions(1));
        attempt.submit(Utc::now()).unwrap();
        assert!(matches!(
            attempt.submit(Utc::now()),
            Err(AttemptError::AlreadySubmitted)
        ));
    }

    #[test]
    fn test_answers_require_started_attempt() {
        let exam = exam_with_questions(1);
        let question_id = exam.questions[0].id;
        let mut attempt = ExamAttempt::new(exam, meridian_core::ids::new_entity_id());
        assert!(matches!(
            attempt.select_answer(question_id, 0),
            Err(AttemptError::NotInProgress)
        ));
        attempt.start().unwrap();
        assert!(matches!(attempt.start(), Err(AttemptError::AlreadyStarted)));
    }

    #[test]
    fn test_extreme_duration_does_not_overflow() {
        let mut exam = exam_with_questions(1);
        exam.duration_minutes = u32::MAX;
        let mut attempt = started(exam);
        assert_eq!(attempt.remaining_seconds(), u32::MAX);

        let result = attempt.submit(Utc::now()).unwrap();
        assert_eq!(result.time_taken_minutes, 0.0);
    }

    #[test]
    fn test_manual_submission_reports_elapsed_time() {
        let mut attempt = started(exam_with_questions(1));
        let now = Utc::now();
        for _ in 0..90 {
            assert!(attempt.tick(now).is_none());
        }
        let result = attempt.submit(now).unwrap();
        assert_eq!(result.time_taken_minutes, 1.5);
    }
}
