// Device API response types
//
// Every reply is a `<response status=".." code="..">` document holding
// `result` and `msg` children. After conversion it reads as
// `{ "response": { "@status", "@code", "result", "msg" } }`. The `@code`
// attribute is text on the wire but numbers are accepted too, and `msg`
// may be a plain string, a `{line: ...}` object, or an array of either.

use serde::Deserialize;
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct XapiResponse {
    pub response: ResponseBody,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "@code", default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub msg: Option<Value>,
}

impl ResponseBody {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Numeric `@code`, whether it arrived as text or a number.
    pub fn code(&self) -> Option<u16> {
        match self.code.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Flatten `msg` into a single line of text.
    pub fn message(&self) -> String {
        self.msg.as_ref().map(flatten_msg).unwrap_or_default()
    }
}

fn flatten_msg(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_msg)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | "),
        Value::Object(map) => map
            .get("line")
            .or_else(|| map.get("member"))
            .map(flatten_msg)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

// ── Session payloads ─────────────────────────────────────────────────

/// `type=version` result.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "sw-version")]
    pub sw_version: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default, rename = "multi-vsys")]
    pub multi_vsys: Option<String>,
}

/// `type=keygen` result.
#[derive(Debug, Deserialize)]
pub struct KeygenResult {
    pub key: String,
}
