use crate::models::{Exam, ExamResult};
use uuid::Uuid;

/// Canonical exam and result lists for one session.
///
/// Results are an append-only ledger: once submitted they are never updated
/// or retracted.
#[derive(Debug, Default)]
pub struct ExamCatalog {
    exams: Vec<Exam>,
    results: Vec<ExamResult>,
}

impl ExamCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(exams: Vec<Exam>, results: Vec<ExamResult>) -> Self {
        Self { exams, results }
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn results(&self) -> &[ExamResult] {
        &self.results
    }

    pub fn exam_by_id(&self, id: Uuid) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    pub fn add_exam(&mut self, exam: Exam) -> Uuid {
        let id = exam.id;
        self.exams.push(exam);
        id
    }

    pub fn record_result(&mut self, result: ExamResult) {
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authoring::{ExamDraft, QuestionDraft};
    use crate::models::QuestionKind;

    fn exam() -> Exam {
        ExamDraft {
            title: "Sample".to_string(),
            description: "Sample exam".to_string(),
            duration_minutes: 15,
            questions: vec![QuestionDraft {
                prompt: "2 + 2 = 4".to_string(),
                options: vec!["True".to_string(), "False".to_string()],
                correct_answer: 0,
                kind: QuestionKind::TrueFalse,
            }],
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_add_and_find_exam() {
        let mut catalog = ExamCatalog::new();
        let id = catalog.add_exam(exam());
        assert!(catalog.exam_by_id(id).is_some());
        assert!(catalog.exam_by_id(uuid::Uuid::new_v4()).is_none());
    }
}
