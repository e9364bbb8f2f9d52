use crate::{prompt::ComposedPrompt, settings::GenerationSettings};
use anyhow::Result;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// A text-generation backend that turns one composed prompt into one text blob.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonModel: Send + Sync {
    /// Makes a single, non-streaming call and returns the raw text output.
    ///
    /// A response without any text is returned as an empty string, not an
    /// error; deciding what an empty answer means is the caller's job.
    async fn complete(
        &self,
        prompt: &ComposedPrompt,
        settings: &GenerationSettings,
    ) -> Result<String>;
}

/// An implementation of `LessonModel` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait]
impl LessonModel for OpenAICompatibleClient {
    async fn complete(
        &self,
        prompt: &ComposedPrompt,
        settings: &GenerationSettings,
    ) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&settings.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompt.system.as_str())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt.user.as_str())
                    .build()?
                    .into(),
            ])
            .temperature(settings.temperature)
            .max_completion_tokens(settings.max_output_tokens)
            .build()?;

        let response: CreateChatCompletionResponse = self.client.chat().create(request).await?;
        debug!(
            choices = response.choices.len(),
            usage = ?response.usage,
            "Received chat completion"
        );

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(text)
    }
}

/// A `LessonModel` that always answers with the same text.
///
/// Useful for development and integration testing without network access
/// or API costs.
#[derive(Debug, Clone)]
pub struct StaticLessonModel {
    response: String,
}

impl StaticLessonModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LessonModel for StaticLessonModel {
    async fn complete(
        &self,
        _prompt: &ComposedPrompt,
        _settings: &GenerationSettings,
    ) -> Result<String> {
        Ok(self.response.clone())
    }
}
