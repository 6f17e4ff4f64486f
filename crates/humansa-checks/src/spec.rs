//! Declarative description of a single HTTP check.

use std::fmt;
use std::time::Duration;

/// HTTP method used by a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
        };
        write!(f, "{}", s)
    }
}

/// Headlines printed for the three ways a check can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Accepted status and body looked right.
    pub ok: &'static str,
    /// Status outside the accepted set.
    pub failed: &'static str,
    /// Transport fault or unreadable body.
    pub error: &'static str,
}

/// How the response body is judged once the status is accepted.
///
/// | Variant | Passes when | Detail |
/// |---------|-------------|--------|
/// | `EchoText` | always | `Response: {body}` |
/// | `ChatChoices` | `choices[0].message.content` is a string | `Response length: {n} chars` |
/// | `Stream` | at least one non-empty line arrives | `Received {n} chunks` |
/// | `ObjectKeys` | body is a JSON object | `{label}: [keys]` |
/// | `JsonType` | body is any JSON value | `Response type: {type}` |
/// | `JsonPreview` | body is any JSON value | first `limit` chars of the JSON |
/// | `StatusOnly` | always | `Status: {code}` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inspection {
    EchoText,
    ChatChoices,
    Stream,
    ObjectKeys { label: &'static str },
    JsonType,
    JsonPreview { limit: usize },
    StatusOnly,
}

/// Everything needed to run and judge one endpoint check.
#[derive(Debug, Clone)]
pub struct CheckSpec {
    /// Name used in the run summary.
    pub name: &'static str,
    /// Title printed in the per-check banner.
    pub title: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
    /// Status codes treated as success.
    pub accepted: &'static [u16],
    pub labels: Labels,
    pub inspection: Inspection,
}

impl CheckSpec {
    /// Returns `true` if `status` is in the accepted set.
    pub fn accepts(&self, status: u16) -> bool {
        self.accepted.contains(&status)
    }
}
