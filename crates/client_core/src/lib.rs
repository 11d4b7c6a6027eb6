//! Client side of the incident chat: sends a question to `POST /chat`, shows
//! the answer, and caches the returned coords and news for the map view.

pub mod chat_client;
pub mod error;
pub mod handler;
pub mod incident_cache;

pub use chat_client::ChatClient;
pub use error::AskError;
pub use handler::{AnswerView, AskHandler, AskOptions, QuestionInput, TextField};
pub use incident_cache::{CacheWriter, CachedValue, IncidentCache, IncidentSnapshot};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
