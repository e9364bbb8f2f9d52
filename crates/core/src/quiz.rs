//! Quiz Selection State
//!
//! Tracks which option the learner picked for each question of one lesson.
//! Each question moves one way, from `Unanswered` to `Answered`; there is no
//! reset short of generating a new lesson.

use crate::lesson::Question;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Question {index} does not exist (quiz has {total} questions)")]
    UnknownQuestion { index: usize, total: usize },
    #[error("Option {option} does not exist for question {index}")]
    UnknownOption { index: usize, option: usize },
    #[error("Question {index} has already been answered")]
    AlreadyAnswered { index: usize },
}

/// The state of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "option", rename_all = "snake_case")]
pub enum Selection {
    Unanswered,
    Answered(usize),
}

/// What the learner sees once a question has been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    /// Text of the correct option, absent when the model's answer index does
    /// not point at an option.
    pub correct_option: Option<String>,
    /// Explanation, absent when the model left it blank.
    pub explanation: Option<String>,
}

impl Feedback {
    fn for_choice(question: &Question, option: usize) -> Self {
        let explanation = question.explanation.trim();
        Self {
            correct: question.is_correct(option),
            correct_option: question.correct_option().map(str::to_string),
            explanation: (!explanation.is_empty()).then(|| explanation.to_string()),
        }
    }

    /// The one-line verdict shown under the question.
    pub fn message(&self) -> String {
        if self.correct {
            return "Correct".to_string();
        }
        match &self.correct_option {
            Some(option) => format!("Not quite. Correct answer: {option}"),
            None => "Not quite.".to_string(),
        }
    }
}

/// Running totals over all questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {}/{} (answered {}/{})",
            self.correct, self.total, self.answered, self.total
        )
    }
}

/// Per-question selections for one generated lesson, keyed by question index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    selections: Vec<Selection>,
}

impl QuizSession {
    /// Starts a session with every question unanswered.
    pub fn new(question_count: usize) -> Self {
        Self {
            selections: vec![Selection::Unanswered; question_count],
        }
    }

    pub fn selection(&self, index: usize) -> Option<Selection> {
        self.selections.get(index).copied()
    }

    /// Records the learner's choice for question `index` and returns the
    /// feedback to reveal.
    pub fn select(
        &mut self,
        quiz: &[Question],
        index: usize,
        option: usize,
    ) -> Result<Feedback, QuizError> {
        let total = self.selections.len();
        let (slot, question) = self
            .selections
            .get_mut(index)
            .zip(quiz.get(index))
            .ok_or(QuizError::UnknownQuestion { index, total })?;

        if let Selection::Answered(_) = slot {
            return Err(QuizError::AlreadyAnswered { index });
        }
        if option >= question.options.len() {
            return Err(QuizError::UnknownOption { index, option });
        }

        *slot = Selection::Answered(option);
        Ok(Feedback::for_choice(question, option))
    }

    /// Feedback for question `index`, present only once it is answered.
    pub fn feedback(&self, quiz: &[Question], index: usize) -> Option<Feedback> {
        match (self.selection(index)?, quiz.get(index)) {
            (Selection::Answered(option), Some(question)) => {
                Some(Feedback::for_choice(question, option))
            }
            _ => None,
        }
    }

    /// Recomputes the score by re-reading every selection.
    pub fn score(&self, quiz: &[Question]) -> Score {
        let mut correct = 0;
        let mut answered = 0;
        for (selection, question) in self.selections.iter().zip(quiz) {
            if let Selection::Answered(option) = selection {
                answered += 1;
                if question.is_correct(*option) {
                    correct += 1;
                }
            }
        }
        Score {
            correct,
            answered,
            total: quiz.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer_index: i64, explanation: &str) -> Question {
        Question {
            question: "Which one?".to_string(),
            options: ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect(),
            answer_index,
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn test_new_session_is_unanswered() {
        let quiz = vec![question(0, ""), question(1, "")];
        let session = QuizSession::new(quiz.len());

        assert_eq!(session.selection(0), Some(Selection::Unanswered));
        assert_eq!(session.selection(2), None);
        assert_eq!(session.feedback(&quiz, 0), None);
        assert_eq!(
            session.score(&quiz),
            Score {
                correct: 0,
                answered: 0,
                total: 2
            }
        );
    }

    #[test]
    fn test_correct_selection_scores() {
        let quiz = vec![question(1, "because")];
        let mut session = QuizSession::new(quiz.len());

        let feedback = session.select(&quiz, 0, 1).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.message(), "Correct");
        assert_eq!(feedback.explanation.as_deref(), Some("because"));
        assert_eq!(session.score(&quiz).to_string(), "Score: 1/1 (answered 1/1)");
    }

    #[test]
    fn test_wrong_selection_names_correct_answer() {
        let quiz = vec![question(2, "  ")];
        let mut session = QuizSession::new(quiz.len());

        let feedback = session.select(&quiz, 0, 0).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.message(), "Not quite. Correct answer: c");
        assert_eq!(feedback.explanation, None);
        assert_eq!(session.score(&quiz).to_string(), "Score: 0/1 (answered 1/1)");
    }

    #[test]
    fn test_answers_cannot_be_changed() {
        let quiz = vec![question(1, "")];
        let mut session = QuizSession::new(quiz.len());

        session.select(&quiz, 0, 0).unwrap();
        assert_eq!(
            session.select(&quiz, 0, 1),
            Err(QuizError::AlreadyAnswered { index: 0 })
        );
        assert_eq!(session.selection(0), Some(Selection::Answered(0)));
    }

    #[test]
    fn test_out_of_range_selections_are_rejected() {
        let quiz = vec![question(1, "")];
        let mut session = QuizSession::new(quiz.len());

        assert_eq!(
            session.select(&quiz, 3, 0),
            Err(QuizError::UnknownQuestion { index: 3, total: 1 })
        );
        assert_eq!(
            session.select(&quiz, 0, 4),
            Err(QuizError::UnknownOption {
                index: 0,
                option: 4
            })
        );
        assert_eq!(session.selection(0), Some(Selection::Unanswered));
    }

    #[test]
    fn test_answer_index_outside_options_never_counts() {
        let quiz = vec![question(7, "")];
        let mut session = QuizSession::new(quiz.len());

        let feedback = session.select(&quiz, 0, 3).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_option, None);
        assert_eq!(feedback.message(), "Not quite.");
    }

    #[test]
    fn test_negative_answer_index_never_counts() {
        let quiz = vec![question(-1, "")];
        let mut session = QuizSession::new(quiz.len());

        let feedback = session.select(&quiz, 0, 3).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.message(), "Not quite.");
        assert_eq!(session.score(&quiz).correct, 0);
    }

    #[test]
    fn test_feedback_stays_revealed() {
        let quiz = vec![question(0, "why"), question(1, "")];
        let mut session = QuizSession::new(quiz.len());

        session.select(&quiz, 1, 1).unwrap();
        assert_eq!(session.feedback(&quiz, 0), None);
        let feedback = session.feedback(&quiz, 1).unwrap();
        assert!(feedback.correct);
        assert_eq!(session.feedback(&quiz, 1), Some(feedback));
    }

    #[test]
    fn test_score_rereads_all_selections() {
        let quiz = vec![question(0, ""), question(1, ""), question(2, "")];
        let mut session = QuizSession::new(quiz.len());

        session.select(&quiz, 0, 0).unwrap();
        session.select(&quiz, 2, 1).unwrap();
        assert_eq!(
            session.score(&quiz),
            Score {
                correct: 1,
                answered: 2,
                total: 3
            }
        );
    }

    #[test]
    fn test_selection_serialization() {
        assert_eq!(
            serde_json::to_string(&Selection::Unanswered).unwrap(),
            r#"{"state":"unanswered"}"#
        );
        assert_eq!(
            serde_json::to_string(&Selection::Answered(2)).unwrap(),
            r#"{"state":"answered","option":2}"#
        );
    }
}
