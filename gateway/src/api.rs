use relay_core::Tweaks;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// Input: the research question plus optional component overrides
#[derive(Debug)]
pub struct ChatRequest {
    pub query: String,
    pub tweaks: Option<Tweaks>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Research query is required")]
    MissingQuery,
    #[error("query must be a string, got {0}")]
    QueryNotText(&'static str),
    #[error("tweaks must be an object of component settings, got {0}")]
    TweaksNotObject(&'static str),
}

impl ChatRequest {
    /// Reads the request fields out of a decoded JSON body.
    ///
    /// Anything that is not an object carries no query.
    pub fn from_body(body: &Value) -> Result<Self, RequestError> {
        let query = match body.get("query") {
            None | Some(Value::Null) => return Err(RequestError::MissingQuery),
            Some(Value::String(q)) if q.is_empty() => return Err(RequestError::MissingQuery),
            Some(Value::String(q)) => q.clone(),
            Some(other) => return Err(RequestError::QueryNotText(kind(other))),
        };

        let tweaks = match body.get("tweaks") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => return Err(RequestError::TweaksNotObject(kind(other))),
        };

        Ok(Self { query, tweaks })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Output: one of the three envelopes a caller can see
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChatResponse {
    Success { data: Value },
    Error { message: String },
}

impl ChatResponse {
    /// Unwraps a top-level `result` field when the flow returns one.
    pub fn success(flow_output: Value) -> Self {
        let data = match flow_output {
            Value::Object(mut map) => match map.remove("result") {
                Some(result) => result,
                None => Value::Object(map),
            },
            other => other,
        };
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
