//! API Models
//!
//! Request payloads and response views for the JSON API, documented for
//! OpenAPI with `utoipa`. Views are built from the core types and never
//! reveal the correct answer of a question the learner has not answered.

use crate::store::StoredLesson;
use chrono::{DateTime, Utc};
use lesson_lab_core::{
    Audience, Feedback, Score, Selection, Style,
    render::{markdown_to_html, mermaid_document},
    settings::{
        DEFAULT_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, MAX_OUTPUT_TOKENS, MAX_TEMPERATURE,
        MIN_OUTPUT_TOKENS, MIN_TEMPERATURE, OUTPUT_TOKENS_STEP, TEMPERATURE_STEP,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

fn default_include_demo() -> bool {
    true
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct CreateLessonPayload {
    #[schema(example = "Gradient Descent")]
    pub topic: String,
    #[schema(value_type = String, example = "bootcamp")]
    pub audience: Audience,
    #[schema(value_type = String, example = "fun_and_analogy_driven")]
    pub style: Style,
    #[serde(default = "default_include_demo")]
    pub include_demo: bool,
    /// Overrides the configured default model.
    #[schema(example = "gpt-4o-mini")]
    pub model: Option<String>,
    #[schema(example = 0.4)]
    pub temperature: Option<f32>,
    #[schema(example = 1400)]
    pub max_output_tokens: Option<u32>,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Copy)]
pub struct SubmitAnswerPayload {
    #[schema(example = 0)]
    pub question_index: usize,
    #[schema(example = 1)]
    pub option_index: usize,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct FeedbackView {
    pub correct: bool,
    #[schema(example = "Not quite. Correct answer: Paris")]
    pub message: String,
    pub explanation: Option<String>,
}

impl From<Feedback> for FeedbackView {
    fn from(feedback: Feedback) -> Self {
        Self {
            correct: feedback.correct,
            message: feedback.message(),
            explanation: feedback.explanation,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    /// The option the learner picked, once answered.
    pub selected: Option<usize>,
    /// Revealed once answered and never hidden again.
    pub feedback: Option<FeedbackView>,
}

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq)]
pub struct ScoreView {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

impl From<Score> for ScoreView {
    fn from(score: Score) -> Self {
        Self {
            correct: score.correct,
            answered: score.answered,
            total: score.total,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct LessonView {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub topic: String,
    pub title: String,
    pub elevator_pitch: String,
    pub lesson_md: String,
    /// `lesson_md` rendered to HTML, with raw HTML escaped.
    pub lesson_html: String,
    pub mermaid: String,
    /// Standalone HTML document rendering `mermaid`, for an iframe `srcdoc`.
    pub diagram_document: String,
    pub next_steps: Vec<String>,
    pub quiz: Vec<QuestionView>,
    pub score: ScoreView,
    /// The exact JSON the model produced, present once every question is
    /// answered.
    pub extracted_json: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LessonView {
    pub fn question(stored: &StoredLesson, index: usize) -> Option<QuestionView> {
        let question = stored.lesson.quiz.get(index)?;
        let selected = match stored.quiz.selection(index)? {
            Selection::Answered(option) => Some(option),
            Selection::Unanswered => None,
        };
        Some(QuestionView {
            index,
            question: question.question.trim().to_string(),
            options: question.options.clone(),
            selected,
            feedback: stored
                .quiz
                .feedback(&stored.lesson.quiz, index)
                .map(FeedbackView::from),
        })
    }
}

impl From<&StoredLesson> for LessonView {
    fn from(stored: &StoredLesson) -> Self {
        let lesson = &stored.lesson;
        Self {
            id: stored.id,
            topic: stored.request.topic.clone(),
            title: lesson.title.clone(),
            elevator_pitch: lesson.elevator_pitch.clone(),
            lesson_md: lesson.lesson_md.clone(),
            lesson_html: markdown_to_html(&lesson.lesson_md),
            mermaid: lesson.mermaid.clone(),
            diagram_document: mermaid_document(&lesson.mermaid),
            next_steps: lesson.next_steps.clone(),
            quiz: (0..lesson.quiz.len())
                .filter_map(|index| LessonView::question(stored, index))
                .collect(),
            score: stored.score().into(),
            extracted_json: stored.revealed_json().map(str::to_string),
            created_at: stored.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct AnswerResponse {
    pub question: QuestionView,
    pub score: ScoreView,
    /// Set by the answer that completes the quiz.
    pub extracted_json: Option<String>,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ChoiceView {
    #[schema(example = "high_school")]
    pub value: String,
    #[schema(example = "High school")]
    pub label: String,
}

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq)]
pub struct TokenRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

/// Everything the page needs to build its input controls.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct OptionsView {
    pub audiences: Vec<ChoiceView>,
    pub styles: Vec<ChoiceView>,
    pub default_model: String,
    pub temperature: TemperatureRange,
    pub max_output_tokens: TokenRange,
}

impl OptionsView {
    pub fn new(default_model: &str) -> Self {
        Self {
            audiences: Audience::ALL
                .iter()
                .map(|a| ChoiceView {
                    value: a.value().to_string(),
                    label: a.label().to_string(),
                })
                .collect(),
            styles: Style::ALL
                .iter()
                .map(|s| ChoiceView {
                    value: s.value().to_string(),
                    label: s.label().to_string(),
                })
                .collect(),
            default_model: default_model.to_string(),
            temperature: TemperatureRange {
                min: MIN_TEMPERATURE,
                max: MAX_TEMPERATURE,
                step: TEMPERATURE_STEP,
                default: DEFAULT_TEMPERATURE,
            },
            max_output_tokens: TokenRange {
                min: MIN_OUTPUT_TOKENS,
                max: MAX_OUTPUT_TOKENS,
                step: OUTPUT_TOKENS_STEP,
                default: DEFAULT_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
    /// Raw model output, present for parse and schema failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lesson_lab_core::{GeneratedLesson, LessonRequest, Question, QuizSession};

    const LESSON_JSON: &str = r#"{"title":"X","elevator_pitch":"Y","lesson_md":"**Z**","mermaid":"flowchart LR\nA-->B","quiz":[{"question":" Q1 ","options":["a","b","c","d"],"answer_index":1,"explanation":"because"},{"question":"Q2","options":["e","f","g","h"],"answer_index":3}],"next_steps":["s1","s2","s3"]}"#;

    fn stored() -> StoredLesson {
        let lesson = GeneratedLesson {
            title: "X".to_string(),
            elevator_pitch: "Y".to_string(),
            lesson_md: "**Z**".to_string(),
            mermaid: "flowchart LR\nA-->B".to_string(),
            quiz: vec![
                Question {
                    question: " Q1 ".to_string(),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    answer_index: 1,
                    explanation: "because".to_string(),
                },
                Question {
                    question: "Q2".to_string(),
                    options: vec!["e".into(), "f".into(), "g".into(), "h".into()],
                    answer_index: 3,
                    explanation: String::new(),
                },
            ],
            next_steps: vec!["s1".into(), "s2".into(), "s3".into()],
        };
        StoredLesson {
            id: Uuid::new_v4(),
            request: LessonRequest::new("Topic", Audience::College, Style::ExamFocused, true)
                .unwrap(),
            quiz: QuizSession::new(lesson.quiz.len()),
            lesson,
            extracted_json: LESSON_JSON.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_lesson_payload_defaults() {
        let json = r#"{"topic": "SQL Joins", "audience": "college", "style": "exam_focused"}"#;
        let payload: CreateLessonPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.topic, "SQL Joins");
        assert_eq!(payload.audience, Audience::College);
        assert_eq!(payload.style, Style::ExamFocused);
        assert!(payload.include_demo);
        assert!(payload.model.is_none());
        assert!(payload.temperature.is_none());
        assert!(payload.max_output_tokens.is_none());
    }

    #[test]
    fn test_create_lesson_payload_rejects_unknown_audience() {
        let json = r#"{"topic": "SQL", "audience": "toddlers", "style": "exam_focused"}"#;
        assert!(serde_json::from_str::<CreateLessonPayload>(json).is_err());
    }

    #[test]
    fn test_lesson_view_hides_unanswered_feedback() {
        let view = LessonView::from(&stored());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(view.quiz.len(), 2);
        assert_eq!(view.quiz[0].question, "Q1");
        assert!(view.quiz.iter().all(|q| q.feedback.is_none() && q.selected.is_none()));
        assert_eq!(view.extracted_json, None);
        assert!(!json.to_string().contains("answer_index"));
        assert!(!json.to_string().contains("because"));
        assert_eq!(view.lesson_html.trim(), "<p><strong>Z</strong></p>");
        assert!(view.diagram_document.contains("flowchart LR"));
    }

    #[test]
    fn test_lesson_view_reveals_answered_feedback() {
        let mut stored = stored();
        stored.quiz.select(&stored.lesson.quiz, 1, 0).unwrap();

        let view = LessonView::from(&stored);
        assert!(view.quiz[0].feedback.is_none());
        assert_eq!(view.quiz[1].selected, Some(0));
        assert_eq!(
            view.quiz[1].feedback,
            Some(FeedbackView {
                correct: false,
                message: "Not quite. Correct answer: h".to_string(),
                explanation: None,
            })
        );
        assert_eq!(
            view.score,
            ScoreView {
                correct: 0,
                answered: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_lesson_view_holds_json_until_quiz_is_complete() {
        let mut stored = stored();
        stored.quiz.select(&stored.lesson.quiz, 0, 1).unwrap();
        assert_eq!(LessonView::from(&stored).extracted_json, None);

        stored.quiz.select(&stored.lesson.quiz, 1, 3).unwrap();
        let view = LessonView::from(&stored);
        assert_eq!(view.extracted_json.as_deref(), Some(LESSON_JSON));
        assert_eq!(view.score.correct, 2);
    }

    #[test]
    fn test_options_view() {
        let options = OptionsView::new("gpt-4o-mini");

        assert_eq!(options.audiences.len(), 4);
        assert_eq!(
            options.styles[1],
            ChoiceView {
                value: "fun_and_analogy_driven".to_string(),
                label: "Fun & analogy-driven".to_string(),
            }
        );
        assert_relative_eq!(options.temperature.default, 0.4);
        assert_relative_eq!(options.temperature.step, 0.05);
        assert_eq!(options.max_output_tokens.min, 512);
        assert_eq!(options.max_output_tokens.max, 4096);
        assert_eq!(options.max_output_tokens.default, 1400);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            message: "Lesson not found".to_string(),
            raw_output: None,
        };
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"message":"Lesson not found"}"#
        );

        let error = ErrorResponse {
            message: "Couldn't parse".to_string(),
            raw_output: Some("nope".to_string()),
        };
        assert!(serde_json::to_string(&error).unwrap().contains(r#""raw_output":"nope""#));
    }
}
