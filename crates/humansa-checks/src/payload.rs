//! Request bodies sent to the Humansa server.
//!
//! Field names are part of the remote contract and must not change.

use serde::Serialize;

const CHAT_MODEL: &str = "gpt-4.1-nano";

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    messages: Vec<ChatMessage>,
    model: &'static str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MultiAgentRequest<'a> {
    user_id: &'a str,
    conversation_id: &'a str,
    message: &'static str,
    agent_type: &'static str,
    stream: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionMetadata {
    session_type: &'static str,
    priority: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HumansaChatRequest<'a> {
    user_id: &'a str,
    conversation_id: &'a str,
    message: &'static str,
    metadata: SessionMetadata,
}

#[derive(Serialize)]
struct DateRange {
    start: &'static str,
    end: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentSearchRequest<'a> {
    user_id: &'a str,
    specialty: &'static str,
    date_range: DateRange,
}

fn to_value<T: Serialize>(payload: T) -> serde_json::Value {
    // Plain structs of strings and numbers always serialize.
    serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
}

/// Non-streaming chat completion with a system and a user turn.
pub fn chat_completion() -> serde_json::Value {
    to_value(ChatCompletionRequest {
        messages: vec![
            ChatMessage {
                role: "system",
                content: "You are a helpful medical assistant.",
            },
            ChatMessage {
                role: "user",
                content: "What are the symptoms of the common cold?",
            },
        ],
        model: CHAT_MODEL,
        stream: false,
        temperature: Some(0.7),
        max_tokens: 150,
    })
}

/// Streaming chat completion with a single user turn.
pub fn streaming_chat() -> serde_json::Value {
    to_value(ChatCompletionRequest {
        messages: vec![ChatMessage {
            role: "user",
            content: "Count from 1 to 5 slowly",
        }],
        model: CHAT_MODEL,
        stream: true,
        temperature: None,
        max_tokens: 50,
    })
}

pub fn multi_agent(user_id: &str, conversation_id: &str) -> serde_json::Value {
    to_value(MultiAgentRequest {
        user_id,
        conversation_id,
        message: "I have a headache and fever. What should I do?",
        agent_type: "medical_assistant",
        stream: false,
    })
}

pub fn humansa_chat(user_id: &str, conversation_id: &str) -> serde_json::Value {
    to_value(HumansaChatRequest {
        user_id,
        conversation_id,
        message: "I need to schedule a checkup",
        metadata: SessionMetadata {
            session_type: "medical_consultation",
            priority: "normal",
        },
    })
}

pub fn appointment_search(user_id: &str) -> serde_json::Value {
    to_value(AppointmentSearchRequest {
        user_id,
        specialty: "general",
        date_range: DateRange {
            start: "2024-01-15",
            end: "2024-01-31",
        },
    })
}
