use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// Stored account record. Passwords are kept and compared in plaintext,
/// matching the persisted layout of the source system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Password-free profile handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserAccount> for User {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub questions: Vec<Question>,
    pub total_marks: u32,
}

/// One submitted attempt. Results are append-only; there is no update or
/// retraction once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub user_id: Uuid,
    pub answers: HashMap<Uuid, usize>,
    pub score: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
    pub time_taken_minutes: f64,
}

impl ExamResult {
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.total_questions) * 100.0
        }
    }
}
