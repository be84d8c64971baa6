//! Quiz model and generated-quiz parsing
//!
//! A quiz is an ordered, immutable list of multiple-choice questions about
//! one article. Quizzes arrive from the generation layer as a JSON array
//! (often wrapped in model prose); parsing and structural validation live
//! here, the LLM call itself does not.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Every question carries exactly this many answer options
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One selectable answer option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: u32,
    pub text: String,
}

/// One multiple-choice question with exactly one correct option
///
/// Field names follow the generator wire contract (`question`,
/// `correctAnswer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<QuizOption>,
    #[serde(rename = "correctAnswer")]
    pub correct_option: u32,
}

impl Question {
    /// Look up an option by id
    pub fn option(&self, option_id: u32) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Strict equality against the designated correct option
    pub fn is_correct(&self, option_id: u32) -> bool {
        self.correct_option == option_id
    }

    fn validate(&self) -> Result<()> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(Error::InvalidQuiz(format!(
                "question {} has {} options, expected {}",
                self.id,
                self.options.len(),
                OPTIONS_PER_QUESTION
            )));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(Error::InvalidQuiz(format!(
                    "question {} has duplicate option id {}",
                    self.id, option.id
                )));
            }
        }

        if !seen.contains(&self.correct_option) {
            return Err(Error::InvalidQuiz(format!(
                "question {} marks option {} correct but has no such option",
                self.id, self.correct_option
            )));
        }

        Ok(())
    }
}

/// Immutable generated quiz for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuiz")]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
}

/// Unvalidated wire form; promoted to `Quiz` via `TryFrom`
#[derive(Deserialize)]
struct RawQuiz {
    #[serde(default = "default_title")]
    title: String,
    questions: Vec<Question>,
}

fn default_title() -> String {
    "Generated Quiz".to_string()
}

impl TryFrom<RawQuiz> for Quiz {
    type Error = Error;

    fn try_from(raw: RawQuiz) -> Result<Self> {
        Quiz::new(raw.title, raw.questions)
    }
}

impl Quiz {
    /// Build a validated quiz
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidQuiz` when the question list is empty,
    /// question ids collide, an option count is wrong, option ids collide
    /// within a question, or a correct-answer id points at no option.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::InvalidQuiz("quiz has no questions".to_string()));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id) {
                return Err(Error::InvalidQuiz(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }

        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    /// Parse a quiz out of raw generation-model output
    ///
    /// Models are instructed to emit a bare JSON array of questions, but
    /// frequently wrap it in prose. The first `[` through the last `]` is
    /// taken as the array; everything outside is ignored.
    ///
    /// # Errors
    ///
    /// `Error::InvalidQuiz` when no array is present, `Error::Json` when
    /// the array does not parse, plus the structural checks of
    /// [`Quiz::new`].
    pub fn from_model_output(raw: &str, title: impl Into<String>) -> Result<Self> {
        let start = raw.find('[').ok_or_else(|| {
            Error::InvalidQuiz("no question array in model output".to_string())
        })?;
        let end = raw.rfind(']').filter(|&end| end > start).ok_or_else(|| {
            Error::InvalidQuiz("unterminated question array in model output".to_string())
        })?;

        let questions: Vec<Question> = serde_json::from_str(&raw[start..=end])?;
        Self::new(title, questions)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id
    pub fn question(&self, question_id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Question at an ordinal position (0-based)
    pub fn question_at(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a valid n-question quiz; option ids 1-4, correct answer
    /// alternates between options 1 and 2.
    pub fn sample_quiz(num_questions: u32) -> Quiz {
        let questions = (1..=num_questions)
            .map(|id| Question {
                id,
                text: format!("Question {}?", id),
                options: (1..=4)
                    .map(|opt| QuizOption {
                        id: opt,
                        text: format!("Option {}", opt),
                    })
                    .collect(),
                correct_option: if id % 2 == 0 { 2 } else { 1 },
            })
            .collect();
        Quiz::new("Sample Quiz", questions).unwrap()
    }
}
