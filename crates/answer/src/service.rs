//! The answer service: grounds a prompt in the knowledge base and forwards
//! it to the model as a single-shot completion. Stateless per question —
//! no conversation memory on either surface.

use crate::prompt;
use askbot_core::error::ProviderError;
use askbot_core::faq::KnowledgeBase;
use askbot_core::provider::{CompletionRequest, Provider};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Ways answering can fail before or during the model call.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The question was empty or whitespace-only.
    #[error("empty question")]
    EmptyQuestion,

    /// The knowledge base has no pairs to ground an answer in.
    #[error("knowledge base is empty")]
    NoKnowledge,

    /// The model call failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Answers user questions from the cached FAQ pairs.
pub struct AnswerService {
    provider: Arc<dyn Provider>,
    model: String,
    knowledge: KnowledgeBase,
}

impl AnswerService {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        knowledge: KnowledgeBase,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            knowledge,
        }
    }

    /// The snapshot this service answers from.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a user question grounded in the cached FAQ pairs.
    ///
    /// The question is validated before any model call: blank input and an
    /// empty knowledge base short-circuit. An empty completion from the
    /// model is replaced by a canned fallback so callers never see an empty
    /// answer.
    pub async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AnswerError::EmptyQuestion);
        }
        if self.knowledge.is_empty() {
            return Err(AnswerError::NoKnowledge);
        }

        let rendered = prompt::render_prompt(&self.knowledge, question);
        debug!(prompt_len = rendered.len(), "rendered grounding prompt");

        let response = match self
            .provider
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt: rendered,
            })
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "model call failed");
                return Err(AnswerError::Provider(e));
            }
        };

        let text = response.text.trim();
        if text.is_empty() {
            return Ok(prompt::EMPTY_COMPLETION_ANSWER.to_string());
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbot_core::faq::QaPair;
    use askbot_core::provider::CompletionResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        reply: Option<String>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.into()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt);
            match &self.reply {
                Some(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    model: request.model,
                }),
                None => Err(ProviderError::Network("connection refused".into())),
            }
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new(vec![
            QaPair::new("Existe idade máxima?", "Apenas idade mínima de 16 anos."),
            QaPair::new("O curso é pago?", "Não, o programa é gratuito."),
        ])
    }

    fn service_with(provider: Arc<MockProvider>, knowledge: KnowledgeBase) -> AnswerService {
        AnswerService::new(provider, "gemini-1.5-flash-latest", knowledge)
    }

    #[tokio::test]
    async fn empty_question_short_circuits_without_model_call() {
        let provider = Arc::new(MockProvider::replying("whatever"));
        let service = service_with(provider.clone(), kb());

        let err = service.answer("").await.unwrap_err();
        assert!(matches!(err, AnswerError::EmptyQuestion));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_question_counts_as_empty() {
        let provider = Arc::new(MockProvider::replying("whatever"));
        let service = service_with(provider.clone(), kb());

        let err = service.answer("   \t  ").await.unwrap_err();
        assert!(matches!(err, AnswerError::EmptyQuestion));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_knowledge_base_short_circuits() {
        let provider = Arc::new(MockProvider::replying("whatever"));
        let service = service_with(provider.clone(), KnowledgeBase::default());

        let err = service.answer("Qual a idade mínima?").await.unwrap_err();
        assert!(matches!(err, AnswerError::NoKnowledge));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn model_text_is_passed_through() {
        let provider = Arc::new(MockProvider::replying("A idade mínima é 16 anos."));
        let service = service_with(provider.clone(), kb());

        let answer = service.answer("Qual a idade mínima?").await.unwrap();
        assert_eq!(answer, "A idade mínima é 16 anos.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_completion_becomes_canned_fallback() {
        let provider = Arc::new(MockProvider::replying("   "));
        let service = service_with(provider.clone(), kb());

        let answer = service.answer("Qual a idade mínima?").await.unwrap();
        assert_eq!(answer, prompt::EMPTY_COMPLETION_ANSWER);
    }

    #[tokio::test]
    async fn provider_failure_is_surfaced() {
        let provider = Arc::new(MockProvider::failing());
        let service = service_with(provider.clone(), kb());

        let err = service.answer("Qual a idade mínima?").await.unwrap_err();
        assert!(matches!(err, AnswerError::Provider(_)));
    }

    #[tokio::test]
    async fn rendered_prompt_carries_overrides_material_and_question() {
        let provider = Arc::new(MockProvider::replying("ok"));
        let service = service_with(provider.clone(), kb());

        service.answer("Tem idade máxima para entrar?").await.unwrap();

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let sent = &prompts[0];
        assert!(sent.contains(prompt::MAX_AGE_ANSWER));
        assert!(sent.contains(prompt::FREE_PROGRAM_ANSWER));
        assert!(sent.contains("QUESTION: Existe idade máxima?"));
        assert!(sent.contains("ANSWER: Não, o programa é gratuito."));
        assert!(sent.contains("Tem idade máxima para entrar?"));
    }

    #[tokio::test]
    async fn question_is_trimmed_before_prompting() {
        let provider = Arc::new(MockProvider::replying("ok"));
        let service = service_with(provider.clone(), kb());

        service.answer("  Onde me inscrevo?  ").await.unwrap();

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("PERGUNTA DO USUÁRIO: Onde me inscrevo?\n"));
    }
}
