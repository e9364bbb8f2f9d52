//! Lesson Generation
//!
//! Drives one generation attempt end to end: compose the prompt, make the
//! single model call, then extract and map the response. Every failure is
//! terminal for the attempt; nothing is retried.

use crate::{
    extract::extract_json,
    lesson::{GeneratedLesson, LessonParseError, parse_and_repair},
    llm_client::LessonModel,
    prompt::compose,
    settings::{GenerationSettings, LessonRequest},
};
use tracing::{info, instrument, warn};

/// Why a generation attempt produced no lesson.
///
/// Parse and schema failures carry the raw model output so it can be shown
/// for debugging.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Model returned an empty response.")]
    EmptyResponse,
    #[error("Couldn't parse JSON output. Error: {message}")]
    Parse { message: String, raw_output: String },
    #[error("JSON parsed, but didn't match expected schema. Error: {message}")]
    Schema { message: String, raw_output: String },
    #[error("Model request failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl GenerationError {
    /// The raw model output, for failures that happened after the model answered.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenerationError::Parse { raw_output, .. }
            | GenerationError::Schema { raw_output, .. } => Some(raw_output),
            GenerationError::EmptyResponse | GenerationError::Upstream(_) => None,
        }
    }
}

/// A successful generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub lesson: GeneratedLesson,
    /// The model's text exactly as received.
    pub raw_output: String,
    /// The JSON the lesson was mapped from.
    pub extracted_json: String,
}

/// Runs one generation attempt against `model`.
#[instrument(
    name = "generate_lesson",
    skip_all,
    fields(
        topic = %request.topic,
        audience = %request.audience,
        style = %request.style,
        model = %settings.model
    )
)]
pub async fn generate(
    model: &dyn LessonModel,
    request: &LessonRequest,
    settings: &GenerationSettings,
) -> Result<Generation, GenerationError> {
    let prompt = compose(request);
    info!(
        temperature = settings.temperature,
        max_output_tokens = settings.max_output_tokens,
        "Requesting lesson from model"
    );

    let raw_output = model
        .complete(&prompt, settings)
        .await
        .map_err(GenerationError::Upstream)?;

    if raw_output.trim().is_empty() {
        warn!("Model returned an empty response");
        return Err(GenerationError::EmptyResponse);
    }

    let extracted = extract_json(&raw_output);
    if extracted.is_none() {
        warn!("No JSON object found in model output; parsing raw text");
    }
    let extracted_json = extracted.unwrap_or(&raw_output).to_string();

    let (lesson, diagram_repaired) = match parse_and_repair(&raw_output) {
        Ok(parsed) => parsed,
        Err(LessonParseError::Parse(message)) => {
            warn!(error = %message, "Model output is not valid JSON");
            return Err(GenerationError::Parse {
                message,
                raw_output,
            });
        }
        Err(LessonParseError::Schema(message)) => {
            warn!(error = %message, "Model output does not match the lesson schema");
            return Err(GenerationError::Schema {
                message,
                raw_output,
            });
        }
    };

    if diagram_repaired {
        info!("Diagram failed validation and was replaced with the fallback");
    }
    info!(
        title = %lesson.title,
        quiz_len = lesson.quiz.len(),
        next_steps = lesson.next_steps.len(),
        "Lesson generated"
    );

    Ok(Generation {
        lesson,
        raw_output,
        extracted_json,
    })
}
