use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Text shown when the server omits `answer` entirely.
pub const MISSING_ANSWER_TEXT: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Body returned by `POST /chat`. Every field is passed through untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_news: Option<Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("chat response body was JSON null")]
pub struct NullResponseBody;

impl ChatResponse {
    /// Builds a response from any JSON document. Non-object documents have no
    /// fields; a bare `null` has nothing to look fields up in and is rejected.
    pub fn from_value(value: Value) -> Result<Self, NullResponseBody> {
        match value {
            Value::Null => Err(NullResponseBody),
            Value::Object(mut fields) => Ok(Self {
                answer: fields.remove("answer"),
                coords: fields.remove("coords"),
                recent_news: fields.remove("recent_news"),
            }),
            _ => Ok(Self::default()),
        }
    }

    pub fn answer_text(&self) -> String {
        match &self.answer {
            None => MISSING_ANSWER_TEXT.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_single_question_field() {
        let body = serde_json::to_value(ChatRequest::new("any crashes on King St?")).expect("json");
        assert_eq!(body, json!({ "question": "any crashes on King St?" }));
    }

    #[test]
    fn object_fields_pass_through_untouched() {
        let response = ChatResponse::from_value(json!({
            "answer": "A",
            "coords": { "lat": 1, "lng": 2 },
            "recent_news": ["x"],
            "extra": true,
        }))
        .expect("object body");

        assert_eq!(response.answer_text(), "A");
        assert_eq!(response.coords, Some(json!({ "lat": 1, "lng": 2 })));
        assert_eq!(response.recent_news, Some(json!(["x"])));
    }

    #[test]
    fn missing_answer_renders_as_undefined() {
        let response = ChatResponse::from_value(json!({ "coords": [] })).expect("object body");
        assert_eq!(response.answer_text(), "undefined");
    }

    #[test]
    fn empty_answer_stays_empty() {
        let response = ChatResponse::from_value(json!({ "answer": "" })).expect("object body");
        assert_eq!(response.answer_text(), "");
    }

    #[test]
    fn non_string_answer_renders_as_json_text() {
        let response =
            ChatResponse::from_value(json!({ "answer": { "n": 3 } })).expect("object body");
        assert_eq!(response.answer_text(), r#"{"n":3}"#);

        let response = ChatResponse::from_value(json!({ "answer": null })).expect("object body");
        assert_eq!(response.answer_text(), "null");
    }

    #[test]
    fn non_object_body_has_no_fields() {
        let response = ChatResponse::from_value(json!([1, 2, 3])).expect("array body");
        assert_eq!(response, ChatResponse::default());
        assert_eq!(response.answer_text(), "undefined");
    }

    #[test]
    fn null_body_is_rejected() {
        assert_eq!(ChatResponse::from_value(Value::Null), Err(NullResponseBody));
    }
}
