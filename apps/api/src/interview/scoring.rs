//! Quiz scoring and assessment statistics. Pure functions.

use serde::{Deserialize, Serialize};

use crate::models::assessment::AssessmentRow;

/// One answered quiz question as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question: String,
    /// The correct answer.
    pub answer: String,
    pub user_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Stored per-question result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    /// Percentage in 0..=100.
    pub score: f64,
    pub results: Vec<QuestionResult>,
}

impl QuizOutcome {
    pub fn wrong(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| !r.is_correct)
    }
}

/// An answer counts only when it equals the correct answer exactly.
pub fn score_quiz(questions: &[AnsweredQuestion]) -> QuizOutcome {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|q| QuestionResult {
            question: q.question.clone(),
            answer: q.answer.clone(),
            user_answer: q.user_answer.clone(),
            is_correct: q.user_answer == q.answer,
            explanation: q.explanation.clone(),
        })
        .collect();

    let score = if results.is_empty() {
        0.0
    } else {
        let correct = results.iter().filter(|r| r.is_correct).count();
        correct as f64 / results.len() as f64 * 100.0
    };

    QuizOutcome { score, results }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub count: usize,
    pub average_score: f64,
    pub latest_score: Option<f64>,
    pub total_questions: usize,
}

/// Stats over assessments ordered oldest first.
pub fn assessment_stats(assessments: &[AssessmentRow]) -> AssessmentStats {
    let count = assessments.len();
    let average_score = if count == 0 {
        0.0
    } else {
        assessments.iter().map(|a| a.quiz_score).sum::<f64>() / count as f64
    };
    let total_questions = assessments
        .iter()
        .map(|a| a.questions.as_array().map_or(0, Vec::len))
        .sum();

    AssessmentStats {
        count,
        average_score,
        latest_score: assessments.last().map(|a| a.quiz_score),
        total_questions,
    }
}
