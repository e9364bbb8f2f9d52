//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the browser UI, the JSON API, and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AnswerResponse, ChoiceView, CreateLessonPayload, ErrorResponse, FeedbackView,
        LessonView, OptionsView, QuestionView, ScoreView, SubmitAnswerPayload, TemperatureRange,
        TokenRange,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_options,
        handlers::create_lesson,
        handlers::get_lesson,
        handlers::submit_answer,
    ),
    components(
        schemas(
            CreateLessonPayload, SubmitAnswerPayload, LessonView, QuestionView, FeedbackView,
            ScoreView, AnswerResponse, OptionsView, ChoiceView, TemperatureRange, TokenRange,
            ErrorResponse
        )
    ),
    tags(
        (name = "Lesson Lab API", description = "One-call lesson, diagram and quiz generation")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/", get(handlers::index))
        .route("/api/options", get(handlers::get_options))
        .route("/api/lessons", post(handlers::create_lesson))
        .route("/api/lessons/{id}", get(handlers::get_lesson))
        .route("/api/lessons/{id}/answers", post(handlers::submit_answer))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
