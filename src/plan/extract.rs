// src/plan/extract.rs

//! JSON extraction from free-form planning output.

use serde_json::Value;

/// Find a JSON object in `text`.
///
/// Planning backends are asked for strict JSON but routinely wrap it in
/// prose or code fences. Strategy:
///
/// 1. Try parsing the whole (trimmed) text as a JSON object.
/// 2. Otherwise scan for the first balanced `{...}` span and parse that.
///
/// Returns `None` when neither yields an object ("no plan produced").
pub fn extract_json_object(text: &str) -> Option<Value> {
    let text = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return Some(value);
        }
    }

    let start = text.find('{')?;
    let mut depth: usize = 0;
    let mut end = None;

    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(start + offset + ch.len_utf8());
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end?;
    serde_json::from_str::<Value>(&text[start..end])
        .ok()
        .filter(Value::is_object)
}
