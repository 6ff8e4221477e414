//! Tolerant decoding of generation-service responses.
//!
//! Responses are expected to be JSON objects but often arrive wrapped in
//! conversational text or markdown fences. Decoding is two-stage: a
//! direct parse first, then the substring from the first `{` to the last
//! `}`. Anything that survives neither stage is a parse failure.

use serde_json::{Map, Value};

use crate::error::{FlowError, Result};

pub(crate) fn decode_json_object(raw: &str) -> Result<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        return Ok(map);
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&raw[start..=end]) {
                return Ok(map);
            }
        }
    }

    Err(FlowError::Parse(snippet(raw)))
}

/// First part of the offending response, for error messages.
fn snippet(raw: &str) -> String {
    const MAX_CHARS: usize = 120;
    if raw.chars().count() <= MAX_CHARS {
        raw.to_string()
    } else {
        let head: String = raw.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
