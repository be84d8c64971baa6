//! Quiz session state machine
//!
//! Tracks one user's traversal of a generated quiz: a movable cursor over
//! the ordered question list, the selected option per question, and the
//! frozen result once submitted. Two phases:
//!
//! ```text
//! InProgress --submit()--> Submitted (terminal, score frozen)
//! ```
//!
//! A session is owned by exactly one user's flow and is never shared;
//! every mutation after submission is a caller bug and fails with
//! `InvalidState`.

use crate::quiz::Quiz;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Frozen outcome of a submitted quiz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// `correct / total × 100`
    pub score_percentage: f64,
}

/// One user's attempt at a quiz
///
/// Serializable so the application layer can persist in-flight attempts
/// between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    quiz: Quiz,
    /// Cursor into the question list, clamped to [0, N-1]
    position: usize,
    /// question id → selected option id; at most one entry per question
    answers: BTreeMap<u32, u32>,
    /// Present once submitted; terminal
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Start a fresh attempt at position 0 with no answers recorded
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            position: 0,
            answers: BTreeMap::new(),
            result: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current cursor position (0-based)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Question under the cursor
    pub fn current_question(&self) -> &crate::quiz::Question {
        // Position is clamped to the question list, which is non-empty by
        // Quiz construction.
        &self.quiz.questions()[self.position]
    }

    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }

    /// Number of questions with a recorded answer
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Selected option for a question, if any
    pub fn selected(&self, question_id: u32) -> Option<u32> {
        self.answers.get(&question_id).copied()
    }

    /// Ids of questions still lacking an answer, in quiz order
    ///
    /// Callers use this to re-prompt after an `IncompleteSubmission`.
    pub fn unanswered_questions(&self) -> Vec<u32> {
        self.quiz
            .questions()
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id)
            .collect()
    }

    fn ensure_in_progress(&self, operation: &str) -> Result<()> {
        if self.is_submitted() {
            return Err(Error::InvalidState(format!(
                "{} on a submitted session",
                operation
            )));
        }
        Ok(())
    }

    /// Record (or overwrite) the selected option for a question
    ///
    /// Does not move the cursor. Only the most recent selection per
    /// question is retained.
    ///
    /// # Errors
    ///
    /// - `InvalidState` after submission
    /// - `InvalidInput` for an unknown question id or an option id the
    ///   question does not offer
    pub fn select_answer(&mut self, question_id: u32, option_id: u32) -> Result<()> {
        self.ensure_in_progress("select_answer")?;

        let question = self.quiz.question(question_id).ok_or_else(|| {
            Error::InvalidInput(format!("unknown question id {}", question_id))
        })?;
        if question.option(option_id).is_none() {
            return Err(Error::InvalidInput(format!(
                "question {} has no option {}",
                question_id, option_id
            )));
        }

        self.answers.insert(question_id, option_id);
        Ok(())
    }

    /// Move the cursor forward one question; no-op at the last question
    pub fn advance(&mut self) -> Result<()> {
        self.ensure_in_progress("advance")?;
        if self.position + 1 < self.quiz.len() {
            self.position += 1;
        }
        Ok(())
    }

    /// Move the cursor back one question; no-op at the first question
    pub fn retreat(&mut self) -> Result<()> {
        self.ensure_in_progress("retreat")?;
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    /// Finalize the attempt and freeze the score
    ///
    /// Scoring is a strict equality count: selected option id against the
    /// question's designated correct option id.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if already submitted
    /// - `IncompleteSubmission` while any question lacks an answer;
    ///   recoverable, see [`QuizSession::unanswered_questions`]
    pub fn submit(&mut self) -> Result<QuizResult> {
        self.ensure_in_progress("submit")?;

        let missing = self.unanswered_questions().len();
        if missing > 0 {
            return Err(Error::IncompleteSubmission { missing });
        }

        let total_questions = self.quiz.len();
        let correct_answers = self
            .quiz
            .questions()
            .iter()
            .filter(|q| self.selected(q.id) == Some(q.correct_option))
            .count();
        let score_percentage = correct_answers as f64 / total_questions as f64 * 100.0;

        let result = QuizResult {
            total_questions,
            correct_answers,
            score_percentage,
        };
        debug!(
            correct = correct_answers,
            total = total_questions,
            "quiz submitted"
        );
        self.result = Some(result);
        Ok(result)
    }

    /// Number of correctly answered questions; valid only post-submit
    pub fn current_score(&self) -> Result<usize> {
        self.result
            .map(|r| r.correct_answers)
            .ok_or_else(|| Error::InvalidState("current_score before submission".to_string()))
    }

    /// Frozen result, once submitted
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }
}
