//! Lesson Lab Core
//!
//! Everything needed to turn a topic into a lesson, diagram and quiz with a
//! single model call, without any HTTP server concerns.

pub mod extract;
pub mod generator;
pub mod lesson;
pub mod llm_client;
pub mod prompt;
pub mod quiz;
pub mod render;
pub mod settings;

pub use generator::{Generation, GenerationError, generate};
pub use lesson::{GeneratedLesson, LessonParseError, Question, parse_generated};
pub use quiz::{Feedback, QuizError, QuizSession, Score, Selection};
pub use settings::{Audience, GenerationSettings, LessonRequest, SettingsError, Style};
