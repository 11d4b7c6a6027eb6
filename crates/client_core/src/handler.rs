use std::sync::{Arc, RwLock};

use shared::protocol::{ChatRequest, ChatResponse};
use tracing::{debug, error, info};

use crate::{chat_client::ChatClient, error::AskError, incident_cache::IncidentCache};

/// Where the question comes from. Read once, synchronously, per invocation.
pub trait QuestionInput: Send + Sync {
    fn value(&self) -> String;
}

/// Where the answer goes. Its text is overwritten on success only.
pub trait AnswerView: Send + Sync {
    fn set_text(&self, text: &str);
}

/// In-memory text element usable on either side of the handler.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    text: Arc<RwLock<String>>,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    pub fn text(&self) -> String {
        match self.text.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, text: impl Into<String>) {
        let text = text.into();
        match self.text.write() {
            Ok(mut guard) => *guard = text,
            Err(poisoned) => *poisoned.into_inner() = text,
        }
    }
}

impl QuestionInput for TextField {
    fn value(&self) -> String {
        self.text()
    }
}

impl AnswerView for TextField {
    fn set_text(&self, text: &str) {
        self.set(text);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AskOptions {
    pub reject_empty_questions: bool,
}

/// The user-action handler: one request, one display update, two cache
/// writes. Clones share the client and the cache. Concurrent requests are
/// not coordinated, but cache writes are taken in the order responses
/// resolve, so the last response to land owns both keys.
#[derive(Clone)]
pub struct AskHandler {
    client: ChatClient,
    cache: IncidentCache,
    options: AskOptions,
}

impl AskHandler {
    pub fn new(client: ChatClient, cache: IncidentCache) -> Self {
        Self::with_options(client, cache, AskOptions::default())
    }

    pub fn with_options(client: ChatClient, cache: IncidentCache, options: AskOptions) -> Self {
        Self {
            client,
            cache,
            options,
        }
    }

    pub fn cache(&self) -> &IncidentCache {
        &self.cache
    }

    /// Request and decode only; neither the view nor the cache is touched.
    pub async fn try_ask(&self, question: &str) -> Result<ChatResponse, AskError> {
        if self.options.reject_empty_questions && question.trim().is_empty() {
            return Err(AskError::EmptyQuestion);
        }
        if question.is_empty() {
            debug!("sending empty question");
        }

        self.client.chat(&ChatRequest::new(question)).await
    }

    /// Runs the full sequence. Failures are logged exactly once and otherwise
    /// swallowed; the returned response is `None` in that case.
    pub async fn ask(
        &self,
        input: &dyn QuestionInput,
        view: &dyn AnswerView,
    ) -> Option<ChatResponse> {
        let question = input.value();

        match self.answer_and_record(&question, view).await {
            Ok(response) => Some(response),
            Err(err) => {
                error!(error = %err, endpoint = %self.client.endpoint(), "chat request failed");
                None
            }
        }
    }

    async fn answer_and_record(
        &self,
        question: &str,
        view: &dyn AnswerView,
    ) -> Result<ChatResponse, AskError> {
        let response = self.try_ask(question).await?;
        // Queue for the cache as soon as the response resolves.
        let writer = self.cache.begin_write().await;

        view.set_text(&response.answer_text());

        writer.record(&response).await.map_err(AskError::store)?;

        info!(
            coords = ?response.coords,
            recent_news = ?response.recent_news,
            "coords and news stored for map view"
        );
        Ok(response)
    }
}
