//! Lesson Request Settings
//!
//! The user-facing knobs for a single generation attempt: what the lesson is
//! about and who it is for (`LessonRequest`), and how the model should be
//! driven (`GenerationSettings`).

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.0;
pub const TEMPERATURE_STEP: f32 = 0.05;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

pub const MIN_OUTPUT_TOKENS: u32 = 512;
pub const MAX_OUTPUT_TOKENS: u32 = 4096;
pub const OUTPUT_TOKENS_STEP: u32 = 64;
pub const DEFAULT_OUTPUT_TOKENS: u32 = 1400;

/// Errors raised while validating user-supplied settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Topic must not be empty")]
    EmptyTopic,
    #[error("Temperature {0} is outside 0.0..=1.0")]
    TemperatureOutOfRange(f32),
    #[error("Max output tokens {0} is outside 512..=4096")]
    OutputTokensOutOfRange(u32),
    #[error("Model name must not be empty")]
    EmptyModel,
}

/// Who the lesson is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    HighSchool,
    College,
    Bootcamp,
    WorkingProfessionals,
}

impl Audience {
    pub const ALL: [Audience; 4] = [
        Audience::HighSchool,
        Audience::College,
        Audience::Bootcamp,
        Audience::WorkingProfessionals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Audience::HighSchool => "High school",
            Audience::College => "College",
            Audience::Bootcamp => "Bootcamp",
            Audience::WorkingProfessionals => "Working professionals",
        }
    }

    /// The wire value used by the JSON API and the page's `<select>`.
    pub fn value(self) -> &'static str {
        match self {
            Audience::HighSchool => "high_school",
            Audience::College => "college",
            Audience::Bootcamp => "bootcamp",
            Audience::WorkingProfessionals => "working_professionals",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The tone the lesson should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    ClearAndPractical,
    FunAndAnalogyDriven,
    ExamFocused,
    StoryBased,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::ClearAndPractical,
        Style::FunAndAnalogyDriven,
        Style::ExamFocused,
        Style::StoryBased,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Style::ClearAndPractical => "Clear & practical",
            Style::FunAndAnalogyDriven => "Fun & analogy-driven",
            Style::ExamFocused => "Exam focused",
            Style::StoryBased => "Story-based",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Style::ClearAndPractical => "clear_and_practical",
            Style::FunAndAnalogyDriven => "fun_and_analogy_driven",
            Style::ExamFocused => "exam_focused",
            Style::StoryBased => "story_based",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four user-supplied fields that shape the lesson content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRequest {
    pub topic: String,
    pub audience: Audience,
    pub style: Style,
    pub include_demo: bool,
}

impl LessonRequest {
    /// Builds a request, rejecting a blank topic. The topic is stored trimmed.
    pub fn new(
        topic: &str,
        audience: Audience,
        style: Style,
        include_demo: bool,
    ) -> Result<Self, SettingsError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SettingsError::EmptyTopic);
        }
        Ok(Self {
            topic: topic.to_string(),
            audience,
            style,
            include_demo,
        })
    }
}

/// How the model is driven for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    /// Validates and builds settings. Bounds are inclusive; step sizes are a
    /// UI concern and are not enforced here.
    pub fn new(
        model: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Self, SettingsError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(SettingsError::EmptyModel);
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(SettingsError::TemperatureOutOfRange(temperature));
        }
        if !(MIN_OUTPUT_TOKENS..=MAX_OUTPUT_TOKENS).contains(&max_output_tokens) {
            return Err(SettingsError::OutputTokensOutOfRange(max_output_tokens));
        }
        Ok(Self {
            model: model.to_string(),
            temperature,
            max_output_tokens,
        })
    }

    /// Settings with the slider defaults for the given model.
    pub fn with_defaults(model: &str) -> Result<Self, SettingsError> {
        Self::new(model, DEFAULT_TEMPERATURE, DEFAULT_OUTPUT_TOKENS)
    }
}
