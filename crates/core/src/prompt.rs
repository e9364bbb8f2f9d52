//! Prompt Composition
//!
//! Builds the two-part instruction payload for a lesson request: a fixed
//! system instruction that pins the JSON schema, and a per-request user
//! instruction that interpolates the request fields and authoring guidelines.

use crate::settings::LessonRequest;

/// Fixed system instruction describing the required JSON schema.
pub const SYSTEM_PROMPT: &str = r#"You are a brilliant teaching assistant.
You create beginner-friendly explanations that are accurate, concrete, and engaging.

Output must be VALID JSON ONLY (no markdown fences, no extra commentary).
Follow the schema exactly.

Schema:
{
  "title": string,
  "elevator_pitch": string,
  "lesson_md": string,              // markdown allowed
  "mermaid": string,                // a mermaid diagram (flowchart or sequenceDiagram). Must start with 'flowchart' or 'sequenceDiagram'
  "quiz": [
    {
      "question": string,
      "options": [string, string, string, string],
      "answer_index": 0|1|2|3,
      "explanation": string
    }
  ],
  "next_steps": [string, string, string]
}
"#;

/// The system and user instructions sent to the model for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
}

/// Composes the instruction pair for a lesson request. Pure formatting.
pub fn compose(request: &LessonRequest) -> ComposedPrompt {
    let user = format!(
        "
Create content for:
- topic: {topic}
- audience: {audience}
- style: {style}
- include_demo: {include_demo}

Guidelines:
- Keep the lesson under ~450 words.
- Prefer concrete examples over jargon.
- Mermaid: keep it simple and readable (<= 12 nodes).
- Quiz: 5 questions, 4 options each, one correct answer.
",
        topic = request.topic,
        audience = request.audience,
        style = request.style,
        include_demo = request.include_demo,
    );

    ComposedPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Audience, Style};

    fn request() -> LessonRequest {
        LessonRequest::new(
            "Backpropagation",
            Audience::Bootcamp,
            Style::FunAndAnalogyDriven,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_system_prompt_is_fixed() {
        let a = compose(&request());
        let b = compose(
            &LessonRequest::new("SQL Joins", Audience::College, Style::ExamFocused, false)
                .unwrap(),
        );
        assert_eq!(a.system, b.system);
        assert_eq!(a.system, SYSTEM_PROMPT);
    }

    #[test]
    fn test_system_prompt_names_every_schema_field() {
        for field in [
            "\"title\"",
            "\"elevator_pitch\"",
            "\"lesson_md\"",
            "\"mermaid\"",
            "\"quiz\"",
            "\"question\"",
            "\"options\"",
            "\"answer_index\"",
            "\"explanation\"",
            "\"next_steps\"",
        ] {
            assert!(SYSTEM_PROMPT.contains(field), "missing {field}");
        }
        assert!(SYSTEM_PROMPT.contains("VALID JSON ONLY"));
    }

    #[test]
    fn test_user_prompt_interpolates_request() {
        let prompt = compose(&request());
        assert!(prompt.user.contains("- topic: Backpropagation"));
        assert!(prompt.user.contains("- audience: Bootcamp"));
        assert!(prompt.user.contains("- style: Fun & analogy-driven"));
        assert!(prompt.user.contains("- include_demo: true"));
    }

    #[test]
    fn test_user_prompt_carries_guidelines() {
        let prompt = compose(&request());
        assert!(prompt.user.contains("under ~450 words"));
        assert!(prompt.user.contains("<= 12 nodes"));
        assert!(prompt.user.contains("5 questions, 4 options each"));
    }
}
