//! Judging of buffered (non-streaming) response bodies.

use humansa_core::{CheckOutcome, ProbeError};
use serde_json::Value;

use crate::spec::{Inspection, Labels};

const UNEXPECTED_FORMAT: &str = "Unexpected response format";
const UNEXPECTED_FORMAT_LIMIT: usize = 200;

/// Evaluates a response body that was read in full.
///
/// `Stream` and `StatusOnly` never reach here; they are handled before the body is read.
pub fn evaluate(inspection: Inspection, labels: &Labels, body: &str) -> Result<CheckOutcome, ProbeError> {
    match inspection {
        Inspection::EchoText => Ok(CheckOutcome::pass(labels.ok, format!("Response: {}", body))),
        Inspection::ChatChoices => chat_choices(labels, body),
        Inspection::ObjectKeys { label } => {
            let data: Value = serde_json::from_str(body)?;
            let object = data
                .as_object()
                .ok_or_else(|| ProbeError::UnexpectedBody(format!("expected a JSON object, got {}", json_type(&data))))?;
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            Ok(CheckOutcome::pass(labels.ok, format!("{}: {:?}", label, keys)))
        }
        Inspection::JsonType => {
            let data: Value = serde_json::from_str(body)?;
            Ok(CheckOutcome::pass(labels.ok, format!("Response type: {}", json_type(&data))))
        }
        Inspection::JsonPreview { limit } => {
            let data: Value = serde_json::from_str(body)?;
            Ok(CheckOutcome::pass(labels.ok, truncate(&data.to_string(), limit)))
        }
        Inspection::Stream | Inspection::StatusOnly => Err(ProbeError::Aborted(format!(
            "{:?} cannot be evaluated from a buffered body",
            inspection
        ))),
    }
}

fn chat_choices(labels: &Labels, body: &str) -> Result<CheckOutcome, ProbeError> {
    let data: Value = serde_json::from_str(body)?;

    let first = match data.get("choices").and_then(Value::as_array).and_then(|c| c.first()) {
        Some(choice) => choice,
        None => {
            return Ok(CheckOutcome::fail(
                UNEXPECTED_FORMAT,
                truncate(&data.to_string(), UNEXPECTED_FORMAT_LIMIT),
            ))
        }
    };

    let content = first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| ProbeError::UnexpectedBody("choices[0].message.content is missing".into()))?;

    Ok(CheckOutcome::pass(
        labels.ok,
        format!("Response length: {} chars", content.chars().count()),
    ))
}

/// Name of a JSON value's type.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First `limit` characters of `text`.
pub fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
