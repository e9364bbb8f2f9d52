//! Generated Lesson Records
//!
//! This module maps untrusted model output onto the fixed lesson shape. Two
//! failure classes are kept apart: text that is not JSON at all, and JSON
//! that does not have the expected fields.

use crate::extract::extract_json;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Leading keywords a diagram source must start with to be rendered as is.
pub const DIAGRAM_MARKERS: [&str; 2] = ["flowchart", "sequenceDiagram"];

/// Replacement diagram used when the model's diagram fails validation.
pub const FALLBACK_DIAGRAM: &str = "flowchart LR\n  A[Mermaid diagram failed validation] --> B[Ask the model to start with flowchart or sequenceDiagram]";

/// The ways a model response can fail to become a `GeneratedLesson`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LessonParseError {
    #[error("Couldn't parse JSON output. Error: {0}")]
    Parse(String),
    #[error("JSON parsed, but didn't match expected schema. Error: {0}")]
    Schema(String),
}

/// One multiple-choice quiz item.
///
/// Items are taken as the model wrote them: the option count and the answer
/// index range are not checked. Missing item fields fall back to empty
/// values rather than failing the whole lesson. An index that does not point
/// at an option is kept as is and never matches a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default = "Question::blank_options")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "lenient_index")]
    pub answer_index: i64,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    fn blank_options() -> Vec<String> {
        vec![String::new(); 4]
    }

    fn answer_position(&self) -> Option<usize> {
        usize::try_from(self.answer_index)
            .ok()
            .filter(|&index| index < self.options.len())
    }

    /// The text of the correct option, if the answer index points at one.
    pub fn correct_option(&self) -> Option<&str> {
        self.answer_position()
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    /// Whether picking `option` answers this question correctly.
    pub fn is_correct(&self, option: usize) -> bool {
        self.answer_position() == Some(option)
    }
}

/// Reads an answer index the way a loose integer cast would: integers,
/// numeric strings and floats (truncated) are accepted, `null` reads as 0.
fn lenient_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| de::Error::custom(format!("answer_index out of range: {n}"))),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"an integer answer index")
        }),
        other => Err(de::Error::custom(format!(
            "invalid answer_index: {other}, expected an integer answer index"
        ))),
    }
}

/// A lesson, diagram and quiz built from a single model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLesson {
    pub title: String,
    pub elevator_pitch: String,
    pub lesson_md: String,
    /// Mermaid source. Always starts with one of `DIAGRAM_MARKERS` once
    /// returned from `parse_generated`.
    pub mermaid: String,
    pub quiz: Vec<Question>,
    pub next_steps: Vec<String>,
}

impl GeneratedLesson {
    /// Replaces the diagram with `FALLBACK_DIAGRAM` unless it starts with a
    /// recognized marker. Returns `true` when a replacement happened.
    pub fn repair_diagram(&mut self) -> bool {
        if has_diagram_marker(&self.mermaid) {
            return false;
        }
        self.mermaid = FALLBACK_DIAGRAM.to_string();
        true
    }
}

/// Whether `source`, ignoring surrounding whitespace, starts with a marker.
pub fn has_diagram_marker(source: &str) -> bool {
    let source = source.trim();
    DIAGRAM_MARKERS
        .iter()
        .any(|marker| source.starts_with(marker))
}

/// Parses raw model output into a lesson.
///
/// The JSON candidate from `extract_json` is used when found, the raw text
/// otherwise. The diagram is repaired after a successful mapping; no other
/// field is validated.
pub fn parse_generated(text: &str) -> Result<GeneratedLesson, LessonParseError> {
    parse_and_repair(text).map(|(lesson, _)| lesson)
}

/// Like `parse_generated`, also reporting whether the diagram was replaced.
pub(crate) fn parse_and_repair(text: &str) -> Result<(GeneratedLesson, bool), LessonParseError> {
    let raw = extract_json(text).unwrap_or(text);

    let value: Value =
        serde_json::from_str(raw).map_err(|e| LessonParseError::Parse(e.to_string()))?;

    let mut lesson: GeneratedLesson =
        serde_json::from_value(value).map_err(|e| LessonParseError::Schema(e.to_string()))?;

    let repaired = lesson.repair_diagram();
    Ok((lesson, repaired))
}
