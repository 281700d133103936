use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::GradingError;

/// Topic label used for wrong answers whose question has no source.
pub const UNKNOWN_TOPIC: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub q: String,
    pub options: Vec<String>,
    /// Correct option, 1-based.
    pub answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Passage id or label the question was drawn from.
    #[serde(default)]
    pub source: String,
}

impl Question {
    /// Label the question's misses are counted under.
    pub fn topic(&self) -> &str {
        let source = self.source.trim();
        if source.is_empty() {
            UNKNOWN_TOPIC
        } else {
            source
        }
    }
}

/// Grading outcome of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub q: String,
    pub selected: usize,
    pub correct: usize,
    pub ok: bool,
    pub explanation: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    /// `floor(100 * correct / total)`.
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    pub per_question: Vec<QuestionOutcome>,
    /// Incorrect answers counted per topic.
    pub wrong_topics: BTreeMap<String, usize>,
}

impl GradeReport {
    /// Topics with at least one miss, most misses first; ties by name.
    pub fn weakest_topics(&self) -> Vec<(&str, usize)> {
        let mut topics: Vec<(&str, usize)> = self
            .wrong_topics
            .iter()
            .map(|(topic, &count)| (topic.as_str(), count))
            .collect();
        topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        topics
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

/// Grades 1-based `answers` against `questions`, position by position.
///
/// An answer outside `1..=options.len()` is simply wrong.
pub fn grade(questions: &[Question], answers: &[usize]) -> Result<GradeReport, GradingError> {
    if questions.is_empty() {
        return Err(GradingError::NoQuestions);
    }
    if answers.len() != questions.len() {
        return Err(GradingError::AnswerCountMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    let mut correct = 0;
    let mut per_question = Vec::with_capacity(questions.len());
    let mut wrong_topics: BTreeMap<String, usize> = BTreeMap::new();

    for (question, &selected) in questions.iter().zip(answers) {
        let ok = selected == question.answer;
        if ok {
            correct += 1;
        } else {
            *wrong_topics.entry(question.topic().to_string()).or_default() += 1;
        }

        per_question.push(QuestionOutcome {
            q: question.q.clone(),
            selected,
            correct: question.answer,
            ok,
            explanation: question.explanation.clone(),
            source: question.source.clone(),
        });
    }

    let total = questions.len();
    let score = (100 * correct / total) as u32;

    debug!(correct, total, score, missed_topics = wrong_topics.len(), "Graded quiz");

    Ok(GradeReport {
        score,
        correct,
        total,
        per_question,
        wrong_topics,
    })
}
