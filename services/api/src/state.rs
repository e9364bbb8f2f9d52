//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the model client and the lesson store.

use crate::{config::Config, store::LessonStore};
use lesson_lab_core::llm_client::LessonModel;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn LessonModel>,
    pub lessons: Arc<LessonStore>,
    pub default_model: Arc<String>,
}

impl AppState {
    pub fn new(config: &Config, model: Arc<dyn LessonModel>) -> Self {
        Self {
            model,
            lessons: Arc::new(LessonStore::new(config.lesson_capacity)),
            default_model: Arc::new(config.default_model.clone()),
        }
    }
}
