//! The built-in endpoint checks, in run order.

use std::sync::Arc;
use std::time::Duration;

use humansa_core::ProbeConfig;

use crate::payload;
use crate::spec::{CheckSpec, Inspection, Labels, Method};
use crate::{Check, HttpCheck};

const OK_ONLY: &[u16] = &[200];
// No matching appointments is reported as 404.
const OK_OR_NOT_FOUND: &[u16] = &[200, 404];

const QUICK: Duration = Duration::from_secs(10);
const SEARCH: Duration = Duration::from_secs(15);
const GENERATION: Duration = Duration::from_secs(30);
const MULTI_AGENT: Duration = Duration::from_secs(45);

/// Returns the nine endpoint check specs, with identifiers taken from `config`.
pub fn default_specs(config: &ProbeConfig) -> Vec<CheckSpec> {
    vec![
        CheckSpec {
            name: "Health Check",
            title: "Health Check",
            method: Method::Get,
            path: "/health",
            body: None,
            timeout: QUICK,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Health check passed",
                failed: "Health check failed",
                error: "Health check error",
            },
            inspection: Inspection::EchoText,
        },
        CheckSpec {
            name: "Ping",
            title: "Ping Test",
            method: Method::Get,
            path: "/ping",
            body: None,
            timeout: QUICK,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Ping successful",
                failed: "Ping failed",
                error: "Ping error",
            },
            inspection: Inspection::EchoText,
        },
        CheckSpec {
            name: "Chat Completion",
            title: "Chat Completion (Non-Streaming)",
            method: Method::Post,
            path: "/v1/chat/completions",
            body: Some(payload::chat_completion()),
            timeout: GENERATION,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Chat completion successful",
                failed: "Chat completion failed",
                error: "Chat completion error",
            },
            inspection: Inspection::ChatChoices,
        },
        CheckSpec {
            name: "Streaming Chat",
            title: "Chat Completion (Streaming)",
            method: Method::Post,
            path: "/v1/chat/completions",
            body: Some(payload::streaming_chat()),
            timeout: GENERATION,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Streaming completed",
                failed: "Streaming failed",
                error: "Streaming error",
            },
            inspection: Inspection::Stream,
        },
        CheckSpec {
            name: "Multi-Agent",
            title: "Multi-Agent Response",
            method: Method::Post,
            path: "/v1/multi-agent/response",
            body: Some(payload::multi_agent(&config.user_id, &config.conversation_id)),
            timeout: MULTI_AGENT,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Multi-agent response successful",
                failed: "Multi-agent failed",
                error: "Multi-agent error",
            },
            inspection: Inspection::ObjectKeys { label: "Response keys" },
        },
        CheckSpec {
            name: "Humansa V2 Chat",
            title: "Humansa V2 Chat",
            method: Method::Post,
            path: "/v2/humansa/chat",
            body: Some(payload::humansa_chat(&config.user_id, &config.conversation_id)),
            timeout: GENERATION,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Humansa V2 chat successful",
                failed: "Humansa V2 chat failed",
                error: "Humansa V2 chat error",
            },
            inspection: Inspection::JsonType,
        },
        CheckSpec {
            name: "Memory Status",
            title: "Memory Service Status",
            method: Method::Get,
            path: "/v2/humansa/memory/status",
            body: None,
            timeout: QUICK,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Memory status retrieved",
                failed: "Memory status failed",
                error: "Memory status error",
            },
            inspection: Inspection::JsonPreview { limit: 100 },
        },
        CheckSpec {
            name: "Debug Info",
            title: "Debug Information",
            method: Method::Get,
            path: "/debug/info",
            body: None,
            timeout: QUICK,
            accepted: OK_ONLY,
            labels: Labels {
                ok: "Debug info retrieved",
                failed: "Debug info failed",
                error: "Debug info error",
            },
            inspection: Inspection::ObjectKeys { label: "Keys" },
        },
        CheckSpec {
            name: "Appointment Search",
            title: "Appointment Search",
            method: Method::Post,
            path: "/v2/humansa/appointment/search",
            body: Some(payload::appointment_search(&config.user_id)),
            timeout: SEARCH,
            accepted: OK_OR_NOT_FOUND,
            labels: Labels {
                ok: "Appointment search completed",
                failed: "Appointment search failed",
                error: "Appointment search error",
            },
            inspection: Inspection::StatusOnly,
        },
    ]
}

/// Returns the built-in checks ready to hand to a runner.
pub fn default_checks(config: &ProbeConfig) -> Vec<Arc<dyn Check>> {
    default_specs(config)
        .into_iter()
        .map(|spec| Arc::new(HttpCheck::new(spec)) as Arc<dyn Check>)
        .collect()
}

/// Looks up a built-in spec by its summary name.
pub fn find_spec(config: &ProbeConfig, name: &str) -> Option<CheckSpec> {
    default_specs(config).into_iter().find(|s| s.name == name)
}
