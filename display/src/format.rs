//! Text formatting for values coming back from the backend untyped.

use serde_json::{Number, Value};

pub const NO_DATA: &str = "无数据";

/// Render a station index as `"<line>行 <number>号"` pairs joined by `", "`.
///
/// The index arrives as raw JSON. Anything that is not a non-empty array
/// renders as [`NO_DATA`]; entries that are not `[line, number, ..]` pairs are
/// coerced to text instead of being rejected.
pub fn format_station_index(index: &Value) -> String {
    let Some(entries) = index.as_array().filter(|entries| !entries.is_empty()) else {
        return NO_DATA.to_string();
    };

    entries
        .iter()
        .map(|entry| match entry.as_array() {
            Some(pair) if pair.len() >= 2 => {
                format!("{}行 {}号", coerce_to_string(&pair[0]), coerce_to_string(&pair[1]))
            }
            _ => coerce_to_string(entry),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loose string conversion matching how a browser stringifies JSON values.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fraction, as `String(1.0)` gives `"1"`.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
