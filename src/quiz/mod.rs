//! Quiz-facing layer over retrieval.
//!
//! [`QuizContextService`] turns a [`QuizRequest`] into the ranked passages handed to
//! question generation; [`grade`] scores a submitted attempt. Prompting and parsing
//! model output happen elsewhere.

pub mod error;
pub mod grading;
pub mod query;
pub mod service;


pub use error::{GradingError, QuizError};
pub use grading::{Difficulty, GradeReport, Question, QuestionOutcome, UNKNOWN_TOPIC, grade};
pub use query::QuizRequest;
pub use service::{ContextPassage, QuizContext, QuizContextService};
