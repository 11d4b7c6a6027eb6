use shared::protocol::NullResponseBody;
use thiserror::Error;

/// Everything that can go wrong between reading the question and writing the
/// cache. Callers of [`crate::AskHandler::ask`] never see these; they are
/// logged once and dropped.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("chat response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    NullBody(#[from] NullResponseBody),
    #[error("failed to update incident cache: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl AskError {
    pub(crate) fn store(error: anyhow::Error) -> Self {
        Self::Store(error.into())
    }
}
