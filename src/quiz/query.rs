use serde::{Deserialize, Serialize};

use super::error::QuizError;
use crate::constants::DEFAULT_NUM_QUESTIONS;
use crate::store::ChapterKey;

/// A request for quiz context on one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub key: ChapterKey,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
}

fn default_num_questions() -> usize {
    DEFAULT_NUM_QUESTIONS
}

impl QuizRequest {
    /// Creates a request for [`DEFAULT_NUM_QUESTIONS`] questions.
    pub fn new(key: ChapterKey) -> Self {
        Self {
            key,
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }

    pub fn with_num_questions(mut self, num_questions: usize) -> Self {
        self.num_questions = num_questions;
        self
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.num_questions == 0 {
            return Err(QuizError::InvalidRequest {
                reason: "num_questions must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The retrieval query embedded for this request.
    ///
    /// ```
    /// use quizrag::quiz::QuizRequest;
    /// use quizrag::store::ChapterKey;
    ///
    /// let req = QuizRequest::new(ChapterKey::new("class 8", "science", "chapter4"))
    ///     .with_num_questions(5);
    /// assert_eq!(
    ///     req.query(),
    ///     "Generate 5 multiple choice questions for class 8 science chapter4"
    /// );
    /// ```
    pub fn query(&self) -> String {
        format!(
            "Generate {} multiple choice questions for {} {} {}",
            self.num_questions, self.key.class_id, self.key.subject_id, self.key.chapter_id
        )
    }
}
