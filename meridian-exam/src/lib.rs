pub mod accounts;
pub mod attempt;
pub mod authoring;
pub mod catalog;
pub mod models;
pub mod reporting;

pub use accounts::{AccountDirectory, AccountError};
pub use attempt::{AttemptError, AttemptStatus, ExamAttempt};
pub use authoring::{AuthoringError, ExamDraft, QuestionDraft};
pub use catalog::ExamCatalog;
