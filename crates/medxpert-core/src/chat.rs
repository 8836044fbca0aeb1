//! Wire types for the `/chat` endpoint.

use serde::{Deserialize, Serialize};

/// Shown in place of the answer when the server sends none.
pub const FALLBACK_ANSWER: &str = "No answer available.";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub lang: String,
}

impl ChatRequest {
    /// Build a request from raw prompt text. Returns `None` when the text is
    /// empty after trimming, since such a prompt is never sent.
    pub fn new(message: &str, lang: &str) -> Option<Self> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        Some(Self {
            message: message.to_string(),
            lang: lang.to_string(),
        })
    }
}

/// How the server arrived at its answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Faq,
    Vaccination,
    Preventive,
    Disease,
    Fallback,
    #[serde(other)]
    Other,
}

impl AnswerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Faq => "faq",
            AnswerKind::Vaccination => "vaccination",
            AnswerKind::Preventive => "preventive",
            AnswerKind::Disease => "disease",
            AnswerKind::Fallback => "fallback",
            AnswerKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub answer: Option<String>,
    /// Structured details attached to some answers (e.g. a vaccination schedule)
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

/// Response envelope of `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "type", default)]
    pub kind: Option<AnswerKind>,
    #[serde(default)]
    pub payload: Payload,
}

/// The text to display for a response: the answer when it is non-empty,
/// otherwise [`FALLBACK_ANSWER`].
pub fn answer_text(response: &ChatResponse) -> &str {
    match response.payload.answer.as_deref() {
        Some(answer) if !answer.is_empty() => answer,
        _ => FALLBACK_ANSWER,
    }
}
