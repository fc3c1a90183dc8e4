// src/assistant/command.rs

use serde::Serialize;
use serde_json::Value;

/// What the user asked the contract to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Increment,
    Read,
    None,
}

/// Reply returned by `POST /chat` when the model does not answer in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub action: Action,
    pub message: String,
}

impl Command {
    pub fn none(message: impl Into<String>) -> Self {
        Self {
            action: Action::None,
            message: message.into(),
        }
    }
}

const INCREMENT_WORDS: &[&str] = &["increment", "incrementa", "aumenta", "increase"];
const READ_WORDS: &[&str] = &["counter", "contador", "value", "valor"];

/// Pulls the assistant's text out of a chat completion response.
///
/// Tries `choices[0].message.content`, then `output_text`, then
/// `data.output_text`, and finally renders the whole body.
pub fn extract_reply_text(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .or_else(|| response.get("output_text"))
        .or_else(|| response.pointer("/data/output_text"))
        .map(|text| match text {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| response.to_string())
}

/// Trims the reply and removes Markdown code fences around it.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if text.starts_with("```") {
        text.replace("```json", "").replace("```", "").trim().to_string()
    } else {
        text.to_string()
    }
}

/// Keyword guess at the user's intent, used when the model's reply is not JSON.
pub fn classify_intent(user_message: &str) -> Action {
    let lower = user_message.to_lowercase();
    if INCREMENT_WORDS.iter().any(|w| lower.contains(w)) {
        Action::Increment
    } else if READ_WORDS.iter().any(|w| lower.contains(w)) {
        Action::Read
    } else {
        Action::None
    }
}

/// Shapes a chat completion response into the JSON returned to the caller.
///
/// A reply that is itself JSON is passed through untouched.
pub fn shape_reply(user_message: &str, response: &Value) -> Value {
    let text = strip_code_fence(&extract_reply_text(response));
    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => parsed,
        Err(_) => {
            let command = Command {
                action: classify_intent(user_message),
                message: text,
            };
            serde_json::to_value(command).unwrap_or(Value::Null)
        }
    }
}
