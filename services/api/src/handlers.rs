//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for lesson
//! generation and quiz answers. It uses `utoipa` doc comments to generate
//! OpenAPI documentation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use lesson_lab_core::{
    GenerationError, GenerationSettings, LessonRequest, QuizError, SettingsError, generate,
    settings::{DEFAULT_OUTPUT_TOKENS, DEFAULT_TEMPERATURE},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    models::{
        AnswerResponse, CreateLessonPayload, ErrorResponse, LessonView, OptionsView,
        SubmitAnswerPayload,
    },
    page::INDEX_HTML,
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Generation(GenerationError),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message,
                    raw_output: None,
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    message,
                    raw_output: None,
                }),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    message,
                    raw_output: None,
                }),
            )
                .into_response(),
            ApiError::Generation(err) => {
                if let GenerationError::Upstream(cause) = &err {
                    error!("Model request failed: {:?}", cause);
                }
                let raw_output = err.raw_output().map(str::to_string);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse {
                        message: err.to_string(),
                        raw_output,
                    }),
                )
                    .into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message,
                        raw_output: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn bad_request(err: SettingsError) -> ApiError {
    ApiError::BadRequest(err.to_string())
}

fn quiz_error(err: QuizError) -> ApiError {
    match err {
        QuizError::AlreadyAnswered { .. } => ApiError::Conflict(err.to_string()),
        QuizError::UnknownQuestion { .. } | QuizError::UnknownOption { .. } => {
            ApiError::BadRequest(err.to_string())
        }
    }
}

fn lesson_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Lesson with id '{}' not found", id))
}

/// Serve the single-page lesson lab UI.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// List the choices and bounds for the lesson form.
#[utoipa::path(
    get,
    path = "/api/options",
    responses(
        (status = 200, description = "Form choices and slider bounds", body = OptionsView)
    )
)]
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsView> {
    Json(OptionsView::new(&state.default_model))
}

/// Generate a lesson, diagram and quiz with a single model call.
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonPayload,
    responses(
        (status = 201, description = "Lesson generated", body = LessonView),
        (status = 400, description = "Blank topic or out-of-range settings", body = ErrorResponse),
        (status = 502, description = "The model failed or returned unusable output", body = ErrorResponse)
    )
)]
pub async fn create_lesson(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLessonPayload>,
) -> Result<(StatusCode, Json<LessonView>), ApiError> {
    let request = LessonRequest::new(
        &payload.topic,
        payload.audience,
        payload.style,
        payload.include_demo,
    )
    .map_err(bad_request)?;

    let model = payload
        .model
        .as_deref()
        .unwrap_or(state.default_model.as_str());
    let settings = GenerationSettings::new(
        model,
        payload.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        payload.max_output_tokens.unwrap_or(DEFAULT_OUTPUT_TOKENS),
    )
    .map_err(bad_request)?;

    let generation = generate(state.model.as_ref(), &request, &settings)
        .await
        .map_err(ApiError::Generation)?;

    let stored = state
        .lessons
        .insert(request, generation.lesson, generation.extracted_json)
        .await;
    info!(lesson_id = %stored.id, "Lesson stored");

    Ok((StatusCode::CREATED, Json(LessonView::from(&stored))))
}

/// Get a generated lesson with its current quiz progress.
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    responses(
        (status = 200, description = "Lesson details", body = LessonView),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    )
)]
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonView>, ApiError> {
    let stored = state
        .lessons
        .get(id)
        .await
        .ok_or_else(|| lesson_not_found(id))?;

    Ok(Json(LessonView::from(&stored)))
}

/// Answer one quiz question. Each question can be answered once.
#[utoipa::path(
    post,
    path = "/api/lessons/{id}/answers",
    request_body = SubmitAnswerPayload,
    responses(
        (status = 200, description = "Answer recorded", body = AnswerResponse),
        (status = 400, description = "Unknown question or option", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 409, description = "Question already answered", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    )
)]
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerPayload>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let (feedback, stored) = state
        .lessons
        .answer(id, payload.question_index, payload.option_index)
        .await
        .ok_or_else(|| lesson_not_found(id))?
        .map_err(|err| {
            warn!(lesson_id = %id, error = %err, "Rejected quiz answer");
            quiz_error(err)
        })?;

    info!(
        lesson_id = %id,
        question = payload.question_index,
        correct = feedback.correct,
        "Quiz answer recorded"
    );

    let question = LessonView::question(&stored, payload.question_index).ok_or_else(|| {
        ApiError::InternalServerError(anyhow::anyhow!(
            "Answered question {} missing from lesson {}",
            payload.question_index,
            id
        ))
    })?;

    Ok(Json(AnswerResponse {
        question,
        score: stored.score().into(),
        extracted_json: stored.revealed_json().map(str::to_string),
    }))
}
