use crate::format::coerce_to_string;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Body returned by every `/api/state/...` endpoint.
///
/// Only `status` decides anything; the remaining fields are read for logging
/// and depend on which endpoint answered. Fields are read leniently, so a
/// body of any shape yields a response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateResponse {
    pub status: String,
    pub message: Option<String>,
    pub next_station: Option<Value>,
    pub direction: Option<Value>,
    pub route_name: Option<Value>,
    pub line_name: Option<Value>,
    pub layout: Option<Value>,
}

impl StateResponse {
    pub fn from_value(body: &Value) -> Self {
        let field = |name: &str| body.get(name).filter(|value| !value.is_null()).cloned();
        Self {
            status: body
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            message: field("message").map(|message| coerce_to_string(&message)),
            next_station: field("next_station"),
            direction: field("direction"),
            route_name: field("route_name"),
            line_name: field("line_name"),
            layout: field("layout"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn message_or_status(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.status)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    OneLine,
    TwoLine,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStyle {
    Default,
    Detail,
}

impl RunStyle {
    /// Branching routes cannot use the detail run view.
    pub fn for_branches(has_branches: bool) -> Self {
        if has_branches {
            Self::Default
        } else {
            Self::Detail
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStyle {
    Default,
    Column,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutBody {
    pub mode: LayoutMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StyleBody<T> {
    pub style: T,
}

/// Parse a wire name (`"two_line"`, `"column"`, ...) into one of the enums above.
pub fn parse_wire_name<T: DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(Value::String(name.to_string())).ok()
}

fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        _ => String::new(),
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&wire_name(self))
    }
}

impl fmt::Display for RunStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&wire_name(self))
    }
}

impl fmt::Display for DetailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&wire_name(self))
    }
}
