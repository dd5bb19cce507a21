//! Maps the service's loosely-typed JSON onto a fixed display schema.
//!
//! Every field is extracted independently and falls back to its own default,
//! so no input can make normalization fail.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";
const NO_MESSAGES: &str = "None";

/// Yes/No flag as displayed in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    /// "Yes" only for the JSON number 1.
    fn from_flag(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_f64) {
            Some(n) if n == 1.0 => Verdict::Yes,
            _ => Verdict::No,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Yes => f.write_str("Yes"),
            Verdict::No => f.write_str("No"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub mime_type: String,
    pub format: String,
    pub size_text: String,
    pub valid: Verdict,
    pub well_formed: Verdict,
    pub valid_message: String,
    pub well_formed_message: String,
    pub messages_text: String,
}

impl NormalizedResult {
    pub fn is_valid(&self) -> bool {
        self.valid == Verdict::Yes
    }
}

/// Normalize a raw service response.
pub fn normalize(raw: &Value) -> NormalizedResult {
    NormalizedResult {
        mime_type: text_or(raw.get("mimeType"), UNKNOWN),
        format: text_or(raw.get("format"), UNKNOWN),
        size_text: size_text(raw.get("size")),
        valid: Verdict::from_flag(raw.get("valid")),
        well_formed: Verdict::from_flag(raw.get("wellFormed")),
        valid_message: text_or(raw.get("validMessage"), NOT_AVAILABLE),
        well_formed_message: text_or(raw.get("wellFormedMessage"), NOT_AVAILABLE),
        messages_text: messages_text(raw.get("messages")),
    }
}

// Empty strings count as absent.
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn size_text(value: Option<&Value>) -> String {
    let Some(Value::Number(n)) = value else {
        return UNKNOWN.to_string();
    };
    if let Some(bytes) = n.as_u64() {
        return format!("{} bytes", bytes);
    }
    match n.as_f64() {
        Some(bytes) if bytes >= 0.0 => format!("{} bytes", bytes),
        _ => UNKNOWN.to_string(),
    }
}

fn messages_text(value: Option<&Value>) -> String {
    let joined = value
        .and_then(Value::as_array)
        .map(|messages| {
            messages
                .iter()
                .filter_map(|m| m.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default();

    if joined.is_empty() {
        NO_MESSAGES.to_string()
    } else {
        joined
    }
}
