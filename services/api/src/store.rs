//! In-Memory Lesson Store
//!
//! Holds generated lessons and their quiz selections for the lifetime of the
//! process. Nothing is persisted; once the store is full the oldest lesson
//! is evicted to make room.

use chrono::{DateTime, Utc};
use lesson_lab_core::{Feedback, GeneratedLesson, LessonRequest, QuizError, QuizSession, Score};
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// A generated lesson together with the learner's progress through its quiz.
#[derive(Debug, Clone)]
pub struct StoredLesson {
    pub id: Uuid,
    pub request: LessonRequest,
    pub lesson: GeneratedLesson,
    pub quiz: QuizSession,
    pub extracted_json: String,
    pub created_at: DateTime<Utc>,
}

impl StoredLesson {
    pub fn score(&self) -> Score {
        self.quiz.score(&self.lesson.quiz)
    }

    /// The model's JSON, held back until every question is answered since it
    /// carries each answer index and explanation.
    pub fn revealed_json(&self) -> Option<&str> {
        let score = self.score();
        (score.answered == score.total).then_some(self.extracted_json.as_str())
    }
}

#[derive(Default)]
struct Inner {
    lessons: HashMap<Uuid, StoredLesson>,
    order: VecDeque<Uuid>,
}

/// A bounded map from lesson id to stored lesson.
pub struct LessonStore {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl LessonStore {
    /// Creates an empty store. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
        }
    }

    /// Stores a freshly generated lesson with every question unanswered.
    pub async fn insert(
        &self,
        request: LessonRequest,
        lesson: GeneratedLesson,
        extracted_json: String,
    ) -> StoredLesson {
        let stored = StoredLesson {
            id: Uuid::new_v4(),
            quiz: QuizSession::new(lesson.quiz.len()),
            request,
            lesson,
            extracted_json,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.lock().await;
        while inner.order.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.lessons.remove(&evicted);
                debug!(lesson_id = %evicted, "Evicted oldest lesson");
            }
        }
        inner.order.push_back(stored.id);
        inner.lessons.insert(stored.id, stored.clone());
        stored
    }

    /// Returns a snapshot of the lesson, if it is still held.
    pub async fn get(&self, id: Uuid) -> Option<StoredLesson> {
        self.inner.lock().await.lessons.get(&id).cloned()
    }

    /// Records an answer for one question.
    ///
    /// Returns `None` when the lesson is unknown, otherwise the outcome of
    /// the selection together with the updated lesson snapshot.
    pub async fn answer(
        &self,
        id: Uuid,
        question_index: usize,
        option_index: usize,
    ) -> Option<Result<(Feedback, StoredLesson), QuizError>> {
        let mut inner = self.inner.lock().await;
        let stored = inner.lessons.get_mut(&id)?;
        let result = stored
            .quiz
            .select(&stored.lesson.quiz, question_index, option_index)
            .map(|feedback| (feedback, stored.clone()));
        Some(result)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.lessons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_lab_core::{Audience, Question, Selection, Style};

    fn request() -> LessonRequest {
        LessonRequest::new("SQL Joins", Audience::College, Style::ClearAndPractical, true)
            .unwrap()
    }

    fn lesson(title: &str) -> GeneratedLesson {
        GeneratedLesson {
            title: title.to_string(),
            elevator_pitch: "pitch".to_string(),
            lesson_md: "body".to_string(),
            mermaid: "flowchart LR\nA-->B".to_string(),
            quiz: vec![Question {
                question: "Q1".to_string(),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                answer_index: 1,
                explanation: "because".to_string(),
            }],
            next_steps: vec!["s1".into(), "s2".into(), "s3".into()],
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = LessonStore::new(4);
        let stored = store.insert(request(), lesson("X"), "{}".to_string()).await;

        let fetched = store.get(stored.id).await.unwrap();
        assert_eq!(fetched.lesson.title, "X");
        assert_eq!(fetched.quiz.selection(0), Some(Selection::Unanswered));
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_oldest_lesson_is_evicted_at_capacity() {
        let store = LessonStore::new(2);
        let first = store.insert(request(), lesson("1"), "{}".to_string()).await;
        let second = store.insert(request(), lesson("2"), "{}".to_string()).await;
        let third = store.insert(request(), lesson("3"), "{}".to_string()).await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(first.id).await.is_none());
        assert!(store.get(second.id).await.is_some());
        assert!(store.get(third.id).await.is_some());
    }

    #[tokio::test]
    async fn test_answer_updates_selection_and_score() {
        let store = LessonStore::new(4);
        let stored = store.insert(request(), lesson("X"), "{}".to_string()).await;

        let (feedback, snapshot) = store.answer(stored.id, 0, 1).await.unwrap().unwrap();
        assert!(feedback.correct);
        assert_eq!(snapshot.score().to_string(), "Score: 1/1 (answered 1/1)");

        let again = store.answer(stored.id, 0, 2).await.unwrap();
        assert_eq!(again.unwrap_err(), QuizError::AlreadyAnswered { index: 0 });

        let fetched = store.get(stored.id).await.unwrap();
        assert_eq!(fetched.quiz.selection(0), Some(Selection::Answered(1)));
    }

    #[tokio::test]
    async fn test_json_is_revealed_only_after_last_answer() {
        let store = LessonStore::new(4);
        let stored = store.insert(request(), lesson("X"), "{\"title\":\"X\"}".to_string()).await;
        assert_eq!(stored.revealed_json(), None);

        let (_, snapshot) = store.answer(stored.id, 0, 0).await.unwrap().unwrap();
        assert_eq!(snapshot.revealed_json(), Some("{\"title\":\"X\"}"));
    }

    #[tokio::test]
    async fn test_answer_for_unknown_lesson() {
        let store = LessonStore::new(4);
        assert!(store.answer(Uuid::new_v4(), 0, 0).await.is_none());
    }
}
